//! Card profiles
//!
//! A [`CardProfile`] describes where a card family keeps its data: the
//! application to select, the personal-info DF and how its rows are
//! addressed, the certificate files and the PIN references. The driving logic
//! in [`crate::EidCard`] is the same for every profile.

use std::fmt;

use crate::path::FilePath;

/// How the EF identifier of a personal-info row is derived from its index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAddressing {
    /// Second identifier byte is the row index
    Linear,
    /// Second identifier byte packs the decimal digits of the index, 23 -> 0x23
    TensOnesBcd,
}

impl RowAddressing {
    /// Second identifier byte for the given row index
    ///
    /// Indexes of 100 and above have no BCD encoding and wrap.
    pub const fn row_byte(self, index: u8) -> u8 {
        match self {
            Self::Linear => index,
            Self::TensOnesBcd => ((index / 10) % 10) * 0x10 + index % 10,
        }
    }

    /// EF identifier of a personal-info row
    pub const fn file_id(self, base: u8, index: u8) -> [u8; 2] {
        [base, self.row_byte(index)]
    }
}

/// Which PIN of the card a reference designates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PinKind {
    /// Authentication PIN
    Pin1,
    /// Signing PIN
    Pin2,
    /// PIN unblocking key
    Puk,
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin1 => write!(f, "PIN 1"),
            Self::Pin2 => write!(f, "PIN 2"),
            Self::Puk => write!(f, "PUK"),
        }
    }
}

/// VERIFY parameters of one PIN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinReference {
    /// PIN this reference belongs to
    pub kind: PinKind,
    /// Reference data qualifier (P2 of VERIFY)
    pub reference: u8,
    /// Byte filling the PIN block after the PIN digits
    pub pad: u8,
    /// File that must be selected before VERIFY, if any
    pub pre_select: Option<FilePath>,
}

/// EF holding the document number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumberFile {
    /// File to select, relative to the application
    pub file: FilePath,
    /// Header bytes preceding the text
    pub header_length: usize,
}

/// Addressing policy of one card family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProfile {
    /// Human readable name
    pub name: &'static str,
    /// Answers To Reset identifying the family, matched exactly
    pub atrs: &'static [&'static [u8]],
    /// Application holding the identity data
    pub application: FilePath,
    /// Document number file, when the card exposes one
    pub document_number: Option<DocumentNumberFile>,
    /// DF holding the personal-info rows
    pub personal_info: FilePath,
    /// First byte of every row EF identifier
    pub personal_info_base: u8,
    /// Rows are numbered `1..row_count`
    pub row_count: u8,
    /// Row identifier scheme
    pub row_addressing: RowAddressing,
    /// Authentication certificate
    pub auth_cert: FilePath,
    /// Signing certificate
    pub sign_cert: FilePath,
    /// PIN references
    pub pins: [PinReference; 3],
}

impl CardProfile {
    /// Look up the profile of a card by its ATR
    pub fn from_atr(atr: &[u8]) -> Option<&'static Self> {
        crate::profiles::registry()
            .into_iter()
            .find(|profile| profile.matches_atr(atr))
    }

    /// Whether the ATR is one of this family's
    pub fn matches_atr(&self, atr: &[u8]) -> bool {
        self.atrs.iter().any(|known| *known == atr)
    }

    /// VERIFY parameters for a PIN
    pub fn pin(&self, kind: PinKind) -> Option<&PinReference> {
        self.pins.iter().find(|pin| pin.kind == kind)
    }

    /// Indexes of the personal-info rows
    pub fn rows(&self) -> std::ops::Range<u8> {
        1..self.row_count
    }

    /// EF of a personal-info row, selected under the personal-info DF
    pub fn row_path(&self, index: u8) -> FilePath {
        FilePath::child_ef(
            self.row_addressing
                .file_id(self.personal_info_base, index),
        )
    }
}

//! Error types for eID operations

use perso_apdu_core::{StatusWord, TransportError};

use crate::certificate::FormatError;
use crate::commands::{ReadBinaryError, SelectError};
use crate::pin::PinError;
use crate::profile::PinKind;

/// Result type for eID operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for eID operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Command, response or transport errors
    #[error(transparent)]
    Apdu(#[from] perso_apdu_core::Error),

    /// SELECT failed
    #[error(transparent)]
    Select(#[from] SelectError),

    /// READ BINARY failed
    #[error(transparent)]
    ReadBinary(#[from] ReadBinaryError),

    /// Certificate data is malformed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// PIN rejected or malformed
    #[error(transparent)]
    Pin(#[from] PinError),

    /// No profile matches the card's ATR
    #[error("Unsupported card with ATR {0}")]
    UnsupportedCard(String),

    /// The profile defines no such PIN
    #[error("{kind} is not defined for {profile} cards")]
    UnknownPin {
        /// Requested PIN
        kind: PinKind,
        /// Profile name
        profile: &'static str,
    },
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Self::Apdu(error.into())
    }
}

impl Error {
    fn apdu_error(&self) -> Option<&perso_apdu_core::Error> {
        match self {
            Self::Apdu(e)
            | Self::Select(SelectError::ResponseError(e))
            | Self::ReadBinary(ReadBinaryError::ResponseError(e)) => Some(e),
            _ => None,
        }
    }

    /// The transport failure behind this error, if any
    ///
    /// Transport failures end the session with the current card.
    pub fn transport_error(&self) -> Option<&TransportError> {
        self.apdu_error().and_then(perso_apdu_core::Error::transport_error)
    }

    /// Status word returned by the card, if the error carries one
    pub fn status_word(&self) -> Option<StatusWord> {
        match self {
            Self::Select(e) => e.status(),
            Self::ReadBinary(e) => e.status(),
            Self::Pin(PinError::Failed(status)) => Some(*status),
            _ => None,
        }
    }
}

//! PIN blocks and verification outcomes

use std::fmt;

use perso_apdu_core::StatusWord;

use crate::constants::PIN_BLOCK_LENGTH;

/// Fixed-size PIN block: the PIN bytes followed by padding
#[derive(Clone, PartialEq, Eq)]
pub struct PinBlock([u8; PIN_BLOCK_LENGTH]);

impl PinBlock {
    /// Build the block for `pin`, filling the remaining bytes with `pad`
    pub fn new(pin: &str, pad: u8) -> Result<Self, PinError> {
        let bytes = pin.as_bytes();
        if bytes.len() > PIN_BLOCK_LENGTH {
            return Err(PinError::TooLong(bytes.len()));
        }

        let mut block = [pad; PIN_BLOCK_LENGTH];
        block[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(block))
    }

    /// Raw block sent as VERIFY data
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Never print the PIN
impl fmt::Debug for PinBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinBlock(..)")
    }
}

/// Outcome of a VERIFY command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinVerification {
    /// PIN accepted
    Success,
    /// PIN rejected, the card allows this many more attempts
    RetriesLeft(u8),
    /// PIN blocked
    Blocked,
    /// Any status word without a documented meaning
    GenericFailure(StatusWord),
}

impl From<StatusWord> for PinVerification {
    fn from(status: StatusWord) -> Self {
        match status.to_u16() {
            0x9000 => Self::Success,
            0x63C2 => Self::RetriesLeft(2),
            0x63C1 => Self::RetriesLeft(1),
            0x6983 | 0x6984 | 0x63C0 => Self::Blocked,
            _ => Self::GenericFailure(status),
        }
    }
}

impl PinVerification {
    /// Whether the PIN was accepted
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Turn a rejection into a [`PinError`]
    pub const fn into_result(self) -> Result<(), PinError> {
        match self {
            Self::Success => Ok(()),
            Self::RetriesLeft(retries_left) => Err(PinError::WrongPin { retries_left }),
            Self::Blocked => Err(PinError::Blocked),
            Self::GenericFailure(status) => Err(PinError::Failed(status)),
        }
    }
}

impl fmt::Display for PinVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "PIN verified"),
            Self::RetriesLeft(n) => write!(f, "Invalid PIN: {} retries left", n),
            Self::Blocked => write!(f, "Invalid PIN: Blocked"),
            Self::GenericFailure(status) => write!(f, "Verify error: {}", status),
        }
    }
}

/// PIN related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    /// PIN does not fit in the block
    #[error("PIN is {0} bytes long, at most 12 are allowed")]
    TooLong(usize),

    /// PIN rejected
    #[error("Invalid PIN: {retries_left} retries left")]
    WrongPin {
        /// Remaining attempts reported by the card
        retries_left: u8,
    },

    /// PIN blocked
    #[error("Invalid PIN: Blocked")]
    Blocked,

    /// Verification failed with an undocumented status word
    #[error("Verify error: {0}")]
    Failed(StatusWord),
}

//! Error types for PC/SC transport

use perso_apdu_core::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    #[error("No readers available")]
    NoReadersAvailable,

    /// Reader not found
    #[error("Reader not found: {0}")]
    ReaderNotFound(String),

    /// No card present in reader
    #[error("No card present in reader: {0}")]
    NoCard(String),

    /// The session was already disconnected
    #[error("Not connected to a card in reader: {0}")]
    NotConnected(String),
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::NoCard(_) | PcscError::Pcsc(pcsc::Error::NoSmartcard) => Self::NoCard,
            PcscError::NotConnected(_)
            | PcscError::Pcsc(pcsc::Error::RemovedCard | pcsc::Error::ResetCard) => Self::Closed,
            PcscError::Pcsc(pcsc::Error::Timeout) => Self::Timeout,
            PcscError::NoReadersAvailable
            | PcscError::ReaderNotFound(_)
            | PcscError::Pcsc(
                pcsc::Error::NoReadersAvailable
                | pcsc::Error::ReaderUnavailable
                | pcsc::Error::UnknownReader,
            ) => Self::Connection,
            PcscError::Pcsc(e) => Self::Other(e.to_string()),
        }
    }
}

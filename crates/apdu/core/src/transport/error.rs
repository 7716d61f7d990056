//! Error types specific to card transport

/// Transport error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection error
    #[error("Failed to connect to device")]
    Connection,

    /// No card is present in the reader
    #[error("No card present")]
    NoCard,

    /// The channel was already closed (card removed, reset or disconnected)
    #[error("Card channel closed")]
    Closed,

    /// Transmission error
    #[error("Failed to transmit data")]
    Transmission,

    /// Operation timed out
    #[error("Operation timed out")]
    Timeout,

    /// Other error with message
    #[error("{0}")]
    Other(String),
}

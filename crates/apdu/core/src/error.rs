//! Core error type for all APDU operations
//!
//! This module provides the error type shared by the command, response, transport
//! and executor layers. Application crates wrap it in their own error enums.

use crate::transport::TransportError;

/// Result type alias using the core [`Error`]
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The transport failed to exchange the APDU
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response is shorter than the two status bytes
    #[error("Incomplete response: {0} bytes")]
    IncompleteResponse(usize),

    /// Command does not fit a short APDU
    #[error("Invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Context error with message and source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },
}

impl Error {
    /// Create a new error with context information
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the transport error if this error originates from the transport
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self.root() {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

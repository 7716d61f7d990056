//! Core traits and types for APDU (Application Protocol Data Unit) operations
//!
//! This crate provides the foundational types and traits for working with smart card
//! APDU commands and responses according to ISO/IEC 7816-4.
//!
//! ## Overview
//!
//! APDU (Application Protocol Data Unit) is the communication format used by smart cards.
//! This crate provides abstractions for:
//!
//! - Creating and serializing short-form APDU commands
//! - Parsing APDU responses and interpreting status words
//! - Communicating with smart cards through different transport layers
//! - Executing typed command/response pairs against a card
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod card;
pub mod command;
pub mod error;
pub mod executor;
pub mod response;
pub mod transport;

pub use card::CardExecutor;
pub use command::{ApduCommand, Command, ExpectedLength};
pub use error::{Error, Result};
pub use executor::Executor;
pub use response::status::StatusWord;
pub use response::{ApduResponse, Response};
pub use transport::{CardTransport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    // Core types
    pub use crate::{Bytes, BytesMut, Error};

    // Command related
    pub use crate::Command;
    pub use crate::command::{ApduCommand, ExpectedLength};

    // Response related
    pub use crate::Response;
    pub use crate::response::ApduResponse;
    pub use crate::response::status::{StatusWord, common as status};
    pub use crate::response::utils;

    // Transport layer
    pub use crate::transport::{CardTransport, TransportError};

    // Executor layer
    pub use crate::card::CardExecutor;
    pub use crate::executor::Executor;
}

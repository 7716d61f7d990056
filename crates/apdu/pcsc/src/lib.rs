//! PC/SC transport implementation for APDU operations
//!
//! This crate provides an implementation of the `CardTransport` trait from
//! `perso-apdu-core` using the PC/SC API for communication with smart cards.
//!
//! A [`PcscTransport`] is a card session: it connects when opened and
//! disconnects when dropped, so the reader is released on every exit path.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use perso_apdu_core::{ApduResponse, CardExecutor, Command, Executor};
//! use perso_apdu_transport_pcsc::PcscDeviceManager;
//!
//! let manager = PcscDeviceManager::new()?;
//!
//! for reader in manager.list_readers()?.iter().filter(|r| r.has_card()) {
//!     println!("Connecting to reader: {}", reader.name());
//!
//!     let transport = manager.open_reader(reader.name())?;
//!     let mut executor = CardExecutor::new(transport);
//!
//!     let mut select = Command::new(0x00, 0xA4, 0x04, 0x0C);
//!     select.data = Some(hex::decode("A000000063504B43532D3135")?.into());
//!     let response = executor.execute(&select)?;
//!     println!("Status: {}", response.status());
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

// Core modules
mod config;
mod error;
mod manager;
mod reader;
mod transport;

// Public exports
pub use config::{Disposition, PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols};

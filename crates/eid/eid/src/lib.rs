//! Reading identity data from eID smart cards
//!
//! This crate drives the ISO/IEC 7816-4 file system of eID cards: selecting
//! the identity application, reading the personal-info rows, reassembling the
//! authentication and signing certificates, and verifying PINs.
//!
//! Supported card families are described by static [`CardProfile`]s and
//! picked by exact ATR match. Everything goes through an
//! [`perso_apdu_core::Executor`], so the same code runs over PC/SC or a
//! scripted transport.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use perso_apdu_core::CardExecutor;
//! use perso_apdu_transport_pcsc::PcscDeviceManager;
//! use perso_eid::EidCard;
//!
//! let manager = PcscDeviceManager::new()?;
//! let transport = manager.open_reader("Generic Smart Card Reader 00 00")?;
//! let atr = transport.atr()?;
//!
//! let mut card = EidCard::from_atr(CardExecutor::new(transport), &atr)?;
//! println!("{}", card.read_all()?);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]

mod card;
pub mod certificate;
pub mod commands;
pub mod constants;
mod error;
pub mod path;
mod perso;
pub mod pin;
mod profile;
pub mod profiles;

pub use card::EidCard;
pub use certificate::{CertificateBuffer, FormatError};
pub use commands::{ReadBinaryError, SelectError};
pub use error::{Error, Result};
pub use path::{FilePath, SelectMode};
pub use perso::{CardReport, PersoRow};
pub use pin::{PinBlock, PinError, PinVerification};
pub use profile::{CardProfile, DocumentNumberFile, PinKind, PinReference, RowAddressing};

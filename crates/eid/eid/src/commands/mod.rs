//! ISO 7816-4 commands used to read an eID card

pub mod read_binary;
pub use read_binary::*;
pub mod select;
pub use select::*;
pub mod verify;
pub use verify::*;

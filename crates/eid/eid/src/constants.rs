//! Protocol constants shared by the eID commands

/// Class byte used by every command (inter-industry, no secure messaging)
pub const CLA: u8 = 0x00;

/// Instruction bytes
pub mod ins {
    /// SELECT
    pub const SELECT: u8 = 0xA4;
    /// READ BINARY
    pub const READ_BINARY: u8 = 0xB0;
    /// VERIFY
    pub const VERIFY: u8 = 0x20;
}

/// P2 of SELECT: return no file control information
pub const SELECT_NO_RESPONSE_DATA: u8 = 0x0C;

/// Largest number of bytes a single READ BINARY returns
pub const MAX_READ_LENGTH: u16 = 256;

/// Largest number of bytes requested by a certificate continuation read
pub const MAX_CONTINUATION_READ: u16 = 255;

/// Size of the padded PIN block sent with VERIFY
pub const PIN_BLOCK_LENGTH: usize = 12;

/// First byte of every personal-info row EF identifier
pub const PERSO_ROW_BASE: u8 = 0x50;

/// DER framing of the certificates stored on the card
pub mod der {
    /// Universal SEQUENCE tag
    pub const SEQUENCE: u8 = 0x30;
    /// Long length form with two length bytes
    pub const LENGTH_TWO_BYTES: u8 = 0x82;
    /// Tag, length form and the two length bytes
    pub const HEADER_LENGTH: usize = 4;
}

//! APDU command definitions and traits
//!
//! This module provides types and traits for working with APDU commands
//! according to ISO/IEC 7816-4. Only the short form is supported: Lc is a
//! single byte (1..=255 data bytes) and Le is a single byte where `0x00`
//! requests the maximum of 256 bytes.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Response};

/// Expected length type for APDU commands
///
/// `0x00` encodes the short-form maximum of 256 bytes.
pub type ExpectedLength = u8;

/// Largest data field a short APDU can carry
pub const MAX_COMMAND_DATA: usize = 255;

/// Largest response a short APDU can request
pub const MAX_RESPONSE_LENGTH: usize = 256;

/// Encode a requested response length as a short-form Le byte
///
/// Returns `None` when the length is zero or exceeds [`MAX_RESPONSE_LENGTH`].
pub const fn encode_le(length: usize) -> Option<ExpectedLength> {
    match length {
        MAX_RESPONSE_LENGTH => Some(0x00),
        1..=255 => Some(length as u8),
        _ => None,
    }
}

/// Core trait for APDU commands
pub trait ApduCommand {
    /// Success response type
    type Success;

    /// Error response type
    type Error: fmt::Debug;

    /// Convert core Error to command-specific error type
    fn convert_error(error: Error) -> Self::Error;

    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data (optional)
    fn data(&self) -> Option<&[u8]>;

    /// Expected response length (optional)
    fn expected_length(&self) -> Option<ExpectedLength>;

    /// Convert to raw APDU bytes
    fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class());
        buffer.put_u8(self.instruction());
        buffer.put_u8(self.p1());
        buffer.put_u8(self.p2());

        // Add Lc and data if present
        if let Some(data) = self.data() {
            buffer.put_u8(data.len() as u8);
            buffer.put_slice(data);
        }

        // Add Le if present
        if let Some(le) = self.expected_length() {
            buffer.put_u8(le);
        }

        buffer.freeze()
    }

    /// Calculate length of serialized command
    fn command_length(&self) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;

        if let Some(data) = self.data() {
            length += 1 + data.len();
        }

        if self.expected_length().is_some() {
            length += 1;
        }

        length
    }

    /// Parse response into the command's response type
    fn parse_response(response: Response) -> Result<Self::Success, Self::Error>;

    /// Parse raw bytes into the command's response type
    fn parse_response_raw(bytes: Bytes) -> Result<Self::Success, Self::Error> {
        let response = Response::from_bytes(&bytes).map_err(Self::convert_error)?;
        Self::parse_response(response)
    }
}

/// Generic APDU command structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data (optional)
    pub data: Option<Bytes>,
    /// Expected length (optional)
    pub le: Option<ExpectedLength>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }
}

impl ApduCommand for Command {
    type Success = Response;
    type Error = Error;

    fn convert_error(error: Error) -> Self::Error {
        error
    }

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        self.ins
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        self.p2
    }

    fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        self.le
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_command_serialization() {
        let mut cmd = Command::new(0x00, 0xA4, 0x04, 0x0C);
        cmd.data = Some(Bytes::copy_from_slice(&hex!("A000000063504B43532D3135")));
        assert_eq!(cmd.to_bytes().as_ref(), hex!("00A4040C0CA000000063504B43532D3135"));

        let mut cmd = Command::new(0x00, 0xB0, 0x01, 0x00);
        cmd.le = Some(0xFF);
        assert_eq!(cmd.to_bytes().as_ref(), hex!("00B00100FF"));
    }

    #[test]
    fn test_command_length() {
        let mut cmd = Command::new(0x00, 0x20, 0x00, 0x01);
        assert_eq!(cmd.command_length(), 4);

        cmd.data = Some(Bytes::from(vec![0xFF; 12]));
        assert_eq!(cmd.command_length(), 17);
        assert_eq!(cmd.to_bytes().len(), 17);

        cmd.le = Some(0x00);
        assert_eq!(cmd.command_length(), 18);
    }

    #[test]
    fn test_le_encoding() {
        assert_eq!(encode_le(256), Some(0x00));
        assert_eq!(encode_le(255), Some(0xFF));
        assert_eq!(encode_le(1), Some(0x01));
        assert_eq!(encode_le(0), None);
        assert_eq!(encode_le(257), None);
    }
}

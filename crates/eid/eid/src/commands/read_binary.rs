use bytes::Bytes;
use perso_apdu_core::command::encode_le;
use perso_apdu_core::prelude::*;

use crate::constants::{CLA, ins};

/// READ BINARY command on the currently selected EF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBinaryCommand {
    offset: u16,
    le: ExpectedLength,
}

impl ReadBinaryCommand {
    /// Read `length` bytes (1..=256) starting at `offset`
    pub fn new(offset: u16, length: u16) -> Result<Self, Error> {
        let le = encode_le(usize::from(length))
            .ok_or(Error::InvalidCommandLength(usize::from(length)))?;
        Ok(Self { offset, le })
    }

    /// Offset of the first byte to read
    pub const fn offset(&self) -> u16 {
        self.offset
    }
}

/// READ BINARY failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadBinaryError {
    /// The card rejected the read
    #[error("Failed to read binary: {0} ({desc})", desc = .0.description())]
    Status(StatusWord),

    /// Error from the exchange itself
    #[error(transparent)]
    ResponseError(#[from] Error),
}

impl ReadBinaryError {
    /// Status word returned by the card, if it answered
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            Self::Status(status) => Some(*status),
            Self::ResponseError(_) => None,
        }
    }
}

impl ApduCommand for ReadBinaryCommand {
    type Success = Bytes;
    type Error = ReadBinaryError;

    fn convert_error(error: Error) -> Self::Error {
        ReadBinaryError::ResponseError(error)
    }

    fn class(&self) -> u8 {
        CLA
    }

    fn instruction(&self) -> u8 {
        ins::READ_BINARY
    }

    fn p1(&self) -> u8 {
        (self.offset >> 8) as u8
    }

    fn p2(&self) -> u8 {
        self.offset as u8
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        Some(self.le)
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        // Fewer bytes than requested means the end of the file was reached
        if response.is_success() {
            Ok(response.payload().clone())
        } else {
            Err(ReadBinaryError::Status(response.status()))
        }
    }
}

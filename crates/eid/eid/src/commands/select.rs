use bytes::Bytes;
use perso_apdu_core::prelude::*;

use crate::constants::{CLA, SELECT_NO_RESPONSE_DATA, ins};
use crate::path::FilePath;

/// SELECT command without response data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCommand {
    p1: u8,
    id: Bytes,
}

impl SelectCommand {
    /// Select the file designated by a path
    pub fn file(path: &FilePath) -> Self {
        Self {
            p1: path.mode().p1(),
            id: path.id().clone(),
        }
    }
}

/// SELECT failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The card rejected the selection
    #[error("Failed to select file: {0} ({desc})", desc = .0.description())]
    Status(StatusWord),

    /// Error from the exchange itself
    #[error(transparent)]
    ResponseError(#[from] Error),
}

impl SelectError {
    /// Status word returned by the card, if it answered
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            Self::Status(status) => Some(*status),
            Self::ResponseError(_) => None,
        }
    }
}

impl ApduCommand for SelectCommand {
    type Success = ();
    type Error = SelectError;

    fn convert_error(error: Error) -> Self::Error {
        SelectError::ResponseError(error)
    }

    fn class(&self) -> u8 {
        CLA
    }

    fn instruction(&self) -> u8 {
        ins::SELECT
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        SELECT_NO_RESPONSE_DATA
    }

    fn data(&self) -> Option<&[u8]> {
        Some(self.id.as_ref())
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        if response.is_success() {
            Ok(())
        } else {
            Err(SelectError::Status(response.status()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SelectMode;
    use hex_literal::hex;

    #[test]
    fn test_select_serialization() {
        let aid = FilePath::aid(hex!("A000000077010800070000FE00000100").to_vec());
        let cmd = SelectCommand::file(&aid);
        assert_eq!(
            cmd.to_bytes().as_ref(),
            hex!("00A4040C10A000000077010800070000FE00000100")
        );

        let path = FilePath::new(SelectMode::PathFromMf, hex!("ADF13411").to_vec());
        assert_eq!(
            SelectCommand::file(&path).to_bytes().as_ref(),
            hex!("00A4080C04ADF13411")
        );
    }

    #[test]
    fn test_select_response() {
        assert_eq!(
            SelectCommand::parse_response_raw(Bytes::copy_from_slice(&hex!("9000"))),
            Ok(())
        );

        let err = SelectCommand::parse_response_raw(Bytes::copy_from_slice(&hex!("6A82"))).unwrap_err();
        assert_eq!(err, SelectError::Status(status::FILE_NOT_FOUND));
        assert_eq!(err.status(), Some(status::FILE_NOT_FOUND));
        assert_eq!(err.to_string(), "Failed to select file: 6A82 (File not found)");
    }
}

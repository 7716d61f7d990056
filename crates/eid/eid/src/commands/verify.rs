use perso_apdu_core::prelude::*;

use crate::constants::{CLA, ins};
use crate::pin::{PinBlock, PinVerification};

/// VERIFY command carrying a padded PIN block
///
/// Any status word is a valid answer: the outcome is decoded into a
/// [`PinVerification`] and only exchange failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPinCommand {
    reference: u8,
    block: PinBlock,
}

impl VerifyPinCommand {
    /// Verify `block` against the PIN designated by `reference`
    pub const fn new(reference: u8, block: PinBlock) -> Self {
        Self { reference, block }
    }
}

impl ApduCommand for VerifyPinCommand {
    type Success = PinVerification;
    type Error = Error;

    fn convert_error(error: Error) -> Self::Error {
        error
    }

    fn class(&self) -> u8 {
        CLA
    }

    fn instruction(&self) -> u8 {
        ins::VERIFY
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        self.reference
    }

    fn data(&self) -> Option<&[u8]> {
        Some(self.block.as_bytes())
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }

    fn parse_response(response: Response) -> Result<Self::Success, Self::Error> {
        Ok(PinVerification::from(response.status()))
    }
}

//! Executor for APDU command execution
//!
//! An executor owns a card transport and turns typed [`ApduCommand`]s into
//! wire exchanges. It is the single point every command of a card session
//! passes through, so commands on one session can never interleave.

use std::fmt;

use bytes::Bytes;
use tracing::{Level, debug, info, trace, warn};

use crate::command::ApduCommand;
use crate::response::ApduResponse;
use crate::transport::CardTransport;
use crate::{Error, Response};

/// Trait for APDU command execution
pub trait Executor: Send + Sync + fmt::Debug {
    /// The transport commands are sent over
    type Transport: CardTransport;

    /// Get a reference to the underlying transport
    fn transport(&self) -> &Self::Transport;

    /// Transmit a raw APDU command
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        trace!(command = %hex::encode_upper(command), "Transmitting command");
        let response = self.do_transmit_raw(command);
        match &response {
            Ok(bytes) => {
                trace!(response = %hex::encode_upper(bytes), "Received response");
            }
            Err(err) => {
                debug!(error = %err, "Error during transmission");
            }
        }
        response
    }

    /// Internal implementation of transmit_raw
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error>;

    /// Execute a typed APDU command and parse its response
    ///
    /// Non-success status words are logged at the level their class calls
    /// for before the command interprets them.
    fn execute<C>(&mut self, command: &C) -> Result<C::Success, C::Error>
    where
        C: ApduCommand,
    {
        let command_bytes = command.to_bytes();
        let response_bytes = self
            .transmit_raw(&command_bytes)
            .map_err(C::convert_error)?;
        let response = Response::from_bytes(&response_bytes)
            .map_err(|e| C::convert_error(e.with_context("Failed to parse response bytes")))?;

        let status = response.status();
        if !status.is_success() {
            let ins = command.instruction();
            let level = status.tracing_level();
            if level == Level::WARN {
                warn!(ins, %status, reason = status.description(), "Card error");
            } else if level == Level::INFO {
                info!(ins, %status, reason = status.description(), "Card warning");
            } else {
                debug!(ins, %status, reason = status.description(), "Card status");
            }
        }

        C::parse_response(response)
    }
}

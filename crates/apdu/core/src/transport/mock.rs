//! Scripted transport for tests

use std::collections::VecDeque;

use bytes::Bytes;

use super::{CardTransport, TransportError};

/// Transport that replays a fixed list of responses and records every command
#[derive(Debug, Clone)]
pub struct MockTransport {
    /// Responses returned in order, one per transmitted command
    responses: VecDeque<Result<Bytes, TransportError>>,
    /// Commands that were sent
    commands: Vec<Bytes>,
    /// Whether the transport is connected
    connected: bool,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            responses: VecDeque::new(),
            commands: Vec::new(),
            connected: true,
        }
    }
}

impl MockTransport {
    /// Create a new mock transport with the given responses
    pub fn new<I, B>(responses: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            responses: responses.into_iter().map(|r| Ok(r.into())).collect(),
            commands: Vec::new(),
            connected: true,
        }
    }

    /// Queue another response
    pub fn push_response(&mut self, response: impl Into<Bytes>) -> &mut Self {
        self.responses.push_back(Ok(response.into()));
        self
    }

    /// Queue a transport failure for the next exchange
    pub fn push_error(&mut self, error: TransportError) -> &mut Self {
        self.responses.push_back(Err(error));
        self
    }

    /// Commands transmitted so far
    pub fn commands(&self) -> &[Bytes] {
        &self.commands
    }

    /// Number of scripted responses not consumed yet
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    /// Simulate the card being pulled out of the reader
    pub const fn disconnect(&mut self) {
        self.connected = false;
    }
}

impl CardTransport for MockTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::Closed);
        }

        self.commands.push(Bytes::copy_from_slice(command));

        self.responses
            .pop_front()
            .unwrap_or(Err(TransportError::Transmission))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

//! Card executor implementation
//!
//! This module provides the CardExecutor implementation, which sends commands
//! straight over a card transport.

use crate::error::Error;
use crate::executor::Executor;
use crate::transport::CardTransport;
use bytes::Bytes;

/// Card executor implementation over a transport
#[derive(Debug)]
pub struct CardExecutor<T>
where
    T: CardTransport,
{
    /// The transport used for communication
    transport: T,
}

impl<T> CardExecutor<T>
where
    T: CardTransport,
{
    /// Create a new card executor with the given transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T> Executor for CardExecutor<T>
where
    T: CardTransport,
{
    type Transport = T;

    fn transport(&self) -> &T {
        &self.transport
    }

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Error> {
        Ok(self.transport.transmit_raw(command)?)
    }
}

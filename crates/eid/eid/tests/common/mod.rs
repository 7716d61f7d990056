//! Simulated eID card for integration tests
#![allow(dead_code, unreachable_pub)]

use std::collections::HashMap;

use bytes::Bytes;
use perso_apdu_core::{CardExecutor, CardTransport, TransportError};
use perso_eid::{CardProfile, EidCard, FilePath};

/// File system of a card: files are keyed by SELECT P1 and identifier
#[derive(Debug, Clone, Default)]
pub struct SimulatedCard {
    /// Selectable files, `None` for DFs
    files: HashMap<(u8, Vec<u8>), Option<Vec<u8>>>,
    /// Content of the selected EF
    selected: Option<Vec<u8>>,
    /// PIN references with their value and remaining attempts
    pins: HashMap<u8, (Vec<u8>, u8)>,
    /// Status word answered to every VERIFY, overriding the PIN check
    verify_status: Option<u16>,
    /// Commands received
    log: Vec<Vec<u8>>,
}

impl SimulatedCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a DF or application
    pub fn with_df(mut self, path: &FilePath) -> Self {
        self.files.insert(key(path), None);
        self
    }

    /// Add an EF with content
    pub fn with_file(mut self, path: &FilePath, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(key(path), Some(content.into()));
        self
    }

    /// Add a PIN block the card accepts for `reference`
    pub fn with_pin(mut self, reference: u8, block: &[u8], attempts: u8) -> Self {
        self.pins.insert(reference, (block.to_vec(), attempts));
        self
    }

    /// Answer every VERIFY with a fixed status word
    pub const fn with_verify_status(mut self, status: u16) -> Self {
        self.verify_status = Some(status);
        self
    }

    /// Every file a profile references, with the given contents
    pub fn for_profile(
        profile: &CardProfile,
        rows: impl IntoIterator<Item = (u8, Vec<u8>)>,
        auth_cert: Vec<u8>,
        sign_cert: Vec<u8>,
    ) -> Self {
        let mut card = Self::new()
            .with_df(&profile.application)
            .with_df(&profile.personal_info)
            .with_file(&profile.auth_cert, auth_cert)
            .with_file(&profile.sign_cert, sign_cert);

        if let Some(document) = &profile.document_number {
            card = card.with_file(&document.file, b"\x01\x09AB0123456".to_vec());
        }
        for pin in &profile.pins {
            if let Some(path) = &pin.pre_select {
                card = card.with_df(path);
            }
        }
        for (index, content) in rows {
            card = card.with_file(&profile.row_path(index), content);
        }

        card
    }

    /// Commands received so far
    pub fn log(&self) -> &[Vec<u8>] {
        &self.log
    }

    /// Commands received with the given instruction byte
    pub fn commands_with_ins(&self, ins: u8) -> Vec<&[u8]> {
        self.log
            .iter()
            .filter(|c| c.get(1) == Some(&ins))
            .map(Vec::as_slice)
            .collect()
    }

    fn select(&mut self, p1: u8, data: &[u8]) -> u16 {
        match self.files.get(&(p1, data.to_vec())) {
            Some(content) => {
                self.selected = content.clone();
                0x9000
            }
            None => 0x6A82,
        }
    }

    fn read_binary(&self, offset: usize, le: u8) -> (Vec<u8>, u16) {
        let Some(content) = &self.selected else {
            return (Vec::new(), 0x6986);
        };
        if offset > content.len() {
            return (Vec::new(), 0x6B00);
        }

        let wanted = if le == 0 { 256 } else { usize::from(le) };
        let end = content.len().min(offset + wanted);
        (content[offset..end].to_vec(), 0x9000)
    }

    fn verify(&mut self, reference: u8, block: &[u8]) -> u16 {
        if let Some(status) = self.verify_status {
            return status;
        }

        let Some((expected, attempts)) = self.pins.get_mut(&reference) else {
            return 0x6A88;
        };
        if *attempts == 0 {
            return 0x6983;
        }
        if expected.as_slice() == block {
            *attempts = 3;
            return 0x9000;
        }

        *attempts -= 1;
        0x63C0 | u16::from(*attempts)
    }
}

impl CardTransport for SimulatedCard {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.log.push(command.to_vec());

        let (data, status) = match command {
            [0x00, 0xA4, p1, 0x0C, lc, rest @ ..] if rest.len() == usize::from(*lc) => {
                (Vec::new(), self.select(*p1, rest))
            }
            [0x00, 0xB0, p1, p2, le] => {
                self.read_binary(usize::from(u16::from_be_bytes([*p1, *p2])), *le)
            }
            [0x00, 0x20, 0x00, reference, 0x0C, block @ ..] if block.len() == 12 => {
                (Vec::new(), self.verify(*reference, block))
            }
            _ => (Vec::new(), 0x6D00),
        };

        let mut response = data;
        response.extend_from_slice(&status.to_be_bytes());
        Ok(Bytes::from(response))
    }

    fn is_connected(&self) -> bool {
        true
    }
}

/// Key of a file in the simulated file system
fn key(path: &FilePath) -> (u8, Vec<u8>) {
    (path.mode().p1(), path.id().to_vec())
}

/// DER certificate of `len` bytes with a two-byte length header
pub fn certificate(len: usize, seed: u8) -> Vec<u8> {
    let body = u16::try_from(len - 4).expect("certificate fits in 64 KiB");
    let mut cert = vec![0x30, 0x82];
    cert.extend_from_slice(&body.to_be_bytes());
    cert.extend((4..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)));
    cert
}

/// Card driver over a simulated card
pub fn eid_card(profile: &CardProfile, card: SimulatedCard) -> EidCard<CardExecutor<SimulatedCard>> {
    EidCard::new(CardExecutor::new(card), profile.clone())
}

/// Simulated card behind a driver
pub fn simulated(card: &EidCard<CardExecutor<SimulatedCard>>) -> &SimulatedCard {
    use perso_apdu_core::Executor;
    card.executor().transport()
}

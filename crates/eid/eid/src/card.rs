//! eID card driver
//!
//! [`EidCard`] drives one card session through its [`Executor`]. The profile
//! decides which files are selected; the protocol logic is shared by every
//! card family.

use bytes::Bytes;
use perso_apdu_core::Executor;
use perso_apdu_core::command::MAX_COMMAND_DATA;
use tracing::{debug, instrument, warn};

use crate::certificate::CertificateBuffer;
use crate::commands::{ReadBinaryCommand, SelectCommand, VerifyPinCommand};
use crate::constants::MAX_READ_LENGTH;
use crate::path::FilePath;
use crate::perso::{CardReport, PersoRow};
use crate::pin::{PinBlock, PinVerification};
use crate::profile::{CardProfile, PinKind};
use crate::{Error, Result};

/// An eID card reached through an executor
#[derive(Debug)]
pub struct EidCard<E: Executor> {
    /// Command executor owning the card session
    executor: E,
    /// Addressing policy of the card
    profile: CardProfile,
}

impl<E: Executor> EidCard<E> {
    /// Drive a card with an explicit profile
    pub const fn new(executor: E, profile: CardProfile) -> Self {
        Self { executor, profile }
    }

    /// Drive a card whose profile is looked up by ATR
    pub fn from_atr(executor: E, atr: &[u8]) -> Result<Self> {
        let profile = CardProfile::from_atr(atr)
            .ok_or_else(|| Error::UnsupportedCard(hex::encode_upper(atr)))?;
        debug!(profile = profile.name, "Matched card profile");
        Ok(Self::new(executor, profile.clone()))
    }

    /// The card's profile
    pub const fn profile(&self) -> &CardProfile {
        &self.profile
    }

    /// The underlying executor
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Select a file, succeeding only on 9000
    #[instrument(level = "debug", skip_all, fields(path = %path))]
    pub fn select_file(&mut self, path: &FilePath) -> Result<()> {
        let len = path.id().len();
        if len == 0 || len > MAX_COMMAND_DATA {
            return Err(perso_apdu_core::Error::InvalidCommandLength(len).into());
        }

        self.executor.execute(&SelectCommand::file(path))?;
        Ok(())
    }

    /// Read `length` bytes (1..=256) of the selected EF at `offset`
    ///
    /// Fewer bytes than requested are returned as is when the end of the file
    /// is reached.
    pub fn read_binary(&mut self, offset: u16, length: u16) -> Result<Bytes> {
        let command = ReadBinaryCommand::new(offset, length)?;
        let data = self.executor.execute(&command)?;
        debug!(offset, requested = length, received = data.len(), "Read binary");
        Ok(data)
    }

    /// Select a file and read its first 256 bytes
    pub fn read_file(&mut self, path: &FilePath) -> Result<Bytes> {
        self.select_file(path)?;
        self.read_binary(0, MAX_READ_LENGTH)
    }

    /// Select the identity application
    pub fn select_application(&mut self) -> Result<()> {
        let aid = self.profile.application.clone();
        self.select_file(&aid)
    }

    /// Read the document number, if the card has one
    ///
    /// The application must be selected.
    pub fn read_document_number(&mut self) -> Result<Option<String>> {
        let Some(document) = self.profile.document_number.clone() else {
            return Ok(None);
        };

        let data = self.read_file(&document.file)?;
        let text = data.get(document.header_length..).unwrap_or_default();
        Ok(Some(String::from_utf8_lossy(text).into_owned()))
    }

    /// Select the personal-info DF and read every row
    ///
    /// The application must be selected. Failing to select the DF is an
    /// error; failing to read a row is not.
    pub fn read_personal_info(&mut self) -> Result<Vec<PersoRow>> {
        let df = self.profile.personal_info.clone();
        self.select_file(&df)?;
        Ok(self.read_rows())
    }

    /// Read every row of the selected personal-info DF
    ///
    /// A row that cannot be selected or read is reported without content
    /// and the remaining rows are still read.
    pub fn read_rows(&mut self) -> Vec<PersoRow> {
        let mut rows = Vec::with_capacity(usize::from(self.profile.row_count));

        for index in self.profile.rows() {
            let path = self.profile.row_path(index);
            let row = match self.read_file(&path) {
                Ok(data) => PersoRow::read(index, &data),
                Err(e) => {
                    warn!(index, error = %e, "Failed to read personal-info row");
                    PersoRow::missing(index)
                }
            };
            rows.push(row);
        }

        rows
    }

    /// Read a DER certificate of any size up to 64 KiB
    ///
    /// The first chunk comes from [`Self::read_file`], the rest from
    /// continuation reads of at most 255 bytes until the length declared in
    /// the DER header is reached.
    #[instrument(level = "debug", skip_all, fields(path = %path))]
    pub fn read_certificate(&mut self, path: &FilePath) -> Result<Bytes> {
        let first = self.read_file(path)?;
        let mut buffer = CertificateBuffer::from_first_chunk(&first)?;
        debug!(
            declared = buffer.declared_length(),
            first = first.len(),
            "Certificate header parsed"
        );

        while let Some((offset, length)) = buffer.next_read()? {
            let chunk = self.read_binary(offset, length)?;
            buffer.append(&chunk)?;
        }

        Ok(buffer.finish()?)
    }

    /// Read the authentication certificate
    pub fn read_auth_certificate(&mut self) -> Result<Bytes> {
        let path = self.profile.auth_cert.clone();
        self.read_certificate(&path)
    }

    /// Read the signing certificate
    pub fn read_sign_certificate(&mut self) -> Result<Bytes> {
        let path = self.profile.sign_cert.clone();
        self.read_certificate(&path)
    }

    /// Send VERIFY with an explicit reference and pad byte
    pub fn verify(&mut self, pin: &str, reference: u8, pad: u8) -> Result<PinVerification> {
        let block = PinBlock::new(pin, pad)?;
        let outcome = self
            .executor
            .execute(&VerifyPinCommand::new(reference, block))?;

        match outcome {
            PinVerification::Success => debug!(reference, "PIN verified"),
            other => warn!(reference, outcome = %other, "PIN verification failed"),
        }

        Ok(outcome)
    }

    /// Verify one of the profile's PINs and report the outcome
    ///
    /// Retry counts are informational; nothing is retried.
    #[instrument(level = "debug", skip(self, pin))]
    pub fn verify_pin_outcome(&mut self, kind: PinKind, pin: &str) -> Result<PinVerification> {
        let reference = self
            .profile
            .pin(kind)
            .cloned()
            .ok_or(Error::UnknownPin {
                kind,
                profile: self.profile.name,
            })?;

        // Reject malformed PINs before touching the card
        PinBlock::new(pin, reference.pad)?;

        if let Some(path) = &reference.pre_select {
            self.select_file(path)?;
        }

        self.verify(pin, reference.reference, reference.pad)
    }

    /// Verify one of the profile's PINs, failing unless it is accepted
    pub fn verify_pin(&mut self, kind: PinKind, pin: &str) -> Result<()> {
        Ok(self.verify_pin_outcome(kind, pin)?.into_result()?)
    }

    /// Read everything the card exposes
    ///
    /// Row failures are tolerated; any other failure ends the read-out.
    #[instrument(level = "debug", skip_all, fields(profile = self.profile.name))]
    pub fn read_all(&mut self) -> Result<CardReport> {
        self.select_application()?;
        let document_number = self.read_document_number()?;
        let rows = self.read_personal_info()?;
        let auth_cert = self.read_auth_certificate()?;
        let sign_cert = self.read_sign_certificate()?;

        Ok(CardReport {
            profile: self.profile.name,
            document_number,
            rows,
            auth_cert,
            sign_cert,
        })
    }
}

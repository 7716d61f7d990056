//! Commands operating on the cards in the readers
//!
//! Readers are processed one after another. A failure ends the session with
//! that card only; the next reader is still processed. Every transport is
//! dropped, and so disconnected, at the end of its iteration.

use perso_apdu_core::{CardExecutor, Executor};
use perso_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager, PcscReader, PcscTransport};
use perso_eid::{CardProfile, CardReport, EidCard, PinKind, PinVerification};
use std::error::Error;
use tracing::{debug, info, warn};

use crate::utils::display::{failure, success, warning};

type Card = EidCard<CardExecutor<PcscTransport>>;

/// Result of opening the card in one reader
type Opened<E> = Result<Option<EidCard<E>>, Box<dyn Error>>;

/// Connect to the card in a reader and match it against the known profiles
///
/// Returns `Ok(None)` for cards no profile matches.
fn open_card(
    manager: &PcscDeviceManager,
    reader: &PcscReader,
    config: &PcscConfig,
) -> Opened<CardExecutor<PcscTransport>> {
    let transport = manager.open_reader_with_config(reader.name(), config.clone())?;
    let atr = transport.atr()?;

    let Some(profile) = CardProfile::from_atr(&atr) else {
        info!(
            reader = reader.name(),
            atr = %hex::encode_upper(&atr),
            "Skipping unsupported card"
        );
        return Ok(None);
    };

    debug!(reader = reader.name(), profile = profile.name, "Card connected");
    let card: Card = EidCard::new(CardExecutor::new(transport), profile.clone());
    Ok(Some(card))
}

/// Read every supported card, handing each report to `emit`
///
/// Returns the number of cards that could not be read.
fn dump_cards<E, F>(
    readers: &[PcscReader],
    mut open: F,
    mut emit: impl FnMut(&CardReport),
) -> usize
where
    E: Executor,
    F: FnMut(&PcscReader) -> Opened<E>,
{
    let mut failures = 0;

    for reader in readers {
        let mut card = match open(reader) {
            Ok(Some(card)) => card,
            Ok(None) => continue,
            Err(e) => {
                warn!(reader = reader.name(), error = %e, "Failed to connect to card");
                failures += 1;
                continue;
            }
        };

        info!(reader = reader.name(), profile = card.profile().name, "Reading card");
        match card.read_all() {
            Ok(report) => emit(&report),
            Err(e) => {
                warn!(reader = reader.name(), error = %e, "Failed to read card");
                failures += 1;
            }
        }
    }

    failures
}

/// Verify a PIN on the first card that can be opened and has its application selected
///
/// Cards that fail before VERIFY is sent are skipped like in a dump; once a
/// PIN has been presented the outcome is final.
fn verify_on_first_card<E, F>(
    readers: &[PcscReader],
    mut open: F,
    kind: PinKind,
    pin: &str,
) -> Result<PinVerification, Box<dyn Error>>
where
    E: Executor,
    F: FnMut(&PcscReader) -> Opened<E>,
{
    for reader in readers {
        let mut card = match open(reader) {
            Ok(Some(card)) => card,
            Ok(None) => continue,
            Err(e) => {
                warn!(reader = reader.name(), error = %e, "Failed to connect to card");
                continue;
            }
        };

        if let Err(e) = card.select_application() {
            warn!(reader = reader.name(), error = %e, "Failed to select application");
            continue;
        }

        info!(reader = reader.name(), profile = card.profile().name, "Verifying {}", kind);
        return Ok(card.verify_pin_outcome(kind, pin)?);
    }

    Err("No supported card found".into())
}

/// Print document number, personal data and certificates of every card
pub fn dump_command(
    manager: &PcscDeviceManager,
    readers: &[PcscReader],
    config: &PcscConfig,
) -> Result<(), Box<dyn Error>> {
    let failures = dump_cards(
        readers,
        |reader| open_card(manager, reader, config),
        |report| println!("{}", report),
    );

    if failures > 0 {
        eprintln!("{}", warning(&format!("{} card(s) could not be read", failures)));
    }

    Ok(())
}

/// Verify a PIN on the first supported card
pub fn verify_pin_command(
    manager: &PcscDeviceManager,
    readers: &[PcscReader],
    config: &PcscConfig,
    kind: PinKind,
    pin: &str,
) -> Result<(), Box<dyn Error>> {
    let outcome = verify_on_first_card(
        readers,
        |reader| open_card(manager, reader, config),
        kind,
        pin,
    )?;

    match outcome {
        PinVerification::Success => println!("{}", success(&format!("{} verified", kind))),
        outcome => {
            println!("{}", failure(&outcome.to_string()));
            outcome.into_result()?;
        }
    }

    Ok(())
}

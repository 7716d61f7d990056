use perso_apdu_transport_pcsc::{PcscDeviceManager, PcscReader};
use perso_eid::CardProfile;

use super::display::section_title;

/// Find a reader with a specific name
pub fn find_reader_by_name(
    manager: &PcscDeviceManager,
    reader_name: &str,
) -> Result<PcscReader, Box<dyn std::error::Error>> {
    let readers = manager.list_readers()?;

    readers
        .iter()
        .find(|r| r.name() == reader_name)
        .cloned()
        .ok_or_else(|| format!("Reader '{}' not found", reader_name).into())
}

/// Readers to process: the named one, or every reader holding a card
pub fn select_readers(
    manager: &PcscDeviceManager,
    reader_name: Option<&str>,
) -> Result<Vec<PcscReader>, Box<dyn std::error::Error>> {
    if let Some(name) = reader_name {
        return Ok(vec![find_reader_by_name(manager, name)?]);
    }

    let readers: Vec<_> = manager
        .list_readers()?
        .into_iter()
        .filter(|r| r.has_card())
        .collect();

    if readers.is_empty() {
        return Err("No reader with a card found".into());
    }

    Ok(readers)
}

/// List all available readers
pub fn list_readers(manager: &PcscDeviceManager) -> Result<(), Box<dyn std::error::Error>> {
    let readers = manager.list_readers()?;

    if readers.is_empty() {
        println!("No readers found!");
        return Ok(());
    }

    println!("{}", section_title("Available readers"));
    for (i, reader) in readers.iter().enumerate() {
        let status = match reader.atr() {
            Some(atr) => match CardProfile::from_atr(atr) {
                Some(profile) => format!("{} card", profile.name),
                None => "unsupported card".to_string(),
            },
            None => "no card".to_string(),
        };
        println!("{}. {} ({})", i + 1, reader.name(), status);

        if let Some(atr) = reader.atr() {
            println!("   ATR: {}", hex::encode_upper(atr));
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use perso_apdu_transport_pcsc::{Disposition, PcscConfig, PcscDeviceManager};
use perso_eid::PinKind;

mod commands;
mod utils;

use commands::*;
use utils::reader;

#[derive(Parser)]
#[command(version, about = "Read personal data and certificates from eID cards")]
struct Cli {
    /// Optional reader name to use (all readers with a card if not specified)
    #[arg(short, long, global = true)]
    reader: Option<String>,

    /// Debug level output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reset the card when disconnecting instead of leaving it as is
    #[arg(long, global = true)]
    reset: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available readers and the cards in them
    List,

    /// Print document number, personal data and certificates (default)
    Dump,

    /// Verify a PIN
    VerifyPin {
        /// PIN code
        #[arg(required = true)]
        pin: String,

        /// Which PIN to verify
        #[arg(short, long, value_enum, default_value_t = PinKind::Pin1)]
        kind: PinKind,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    // Create a PC/SC device manager
    let manager = PcscDeviceManager::new()?;

    let config = if cli.reset {
        PcscConfig::default().with_disposition(Disposition::Reset)
    } else {
        PcscConfig::default()
    };

    match cli.command.unwrap_or(Commands::Dump) {
        Commands::List => reader::list_readers(&manager)?,
        Commands::Dump => {
            let readers = reader::select_readers(&manager, cli.reader.as_deref())?;
            dump_command(&manager, &readers, &config)?;
        }
        Commands::VerifyPin { pin, kind } => {
            let readers = reader::select_readers(&manager, cli.reader.as_deref())?;
            verify_pin_command(&manager, &readers, &config, kind, &pin)?;
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr so stdout only carries card data
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .init();
}

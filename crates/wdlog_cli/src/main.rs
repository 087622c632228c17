//! wdlog CLI
//!
//! Command-line tools for watchdog event log region images.
//!
//! # Commands
//!
//! - `init` - Create a formatted region image
//! - `append` - Append a boot or reset event
//! - `dump` - List stored records, oldest first
//! - `latest` - Show the most recent record
//! - `inspect` - Display layout and statistics
//! - `verify` - Check that every slot decodes
//! - `wipe` - Format an existing image

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wdlog_codec::LogEvent;
use wdlog_core::WrapPolicy;

/// Watchdog event log image tools.
#[derive(Parser)]
#[command(name = "wdlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the region image file
    #[arg(global = true, short, long)]
    image: Option<PathBuf>,

    /// Behaviour once the region is full (overwrite, halt)
    #[arg(global = true, long, default_value = "overwrite")]
    policy: WrapPolicy,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a formatted region image
    Init {
        /// Region size in bytes
        #[arg(short, long, default_value_t = wdlog_core::DEFAULT_REGION_SIZE)]
        size: u64,

        /// Replace an existing image
        #[arg(short, long)]
        force: bool,
    },

    /// Append an event (boot, reset)
    Append {
        /// Event to record
        event: LogEvent,

        /// Event time in seconds (defaults to now)
        #[arg(short, long)]
        time: Option<u32>,
    },

    /// List stored records, oldest first
    Dump {
        /// Show only the newest N records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the most recent record
    Latest {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display region layout and log statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that every slot holds a valid record
    Verify,

    /// Format the image, discarding all records
    Wipe,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { size, force } => {
            let path = cli.image.ok_or("Image path required for init")?;
            commands::init::run(&path, size, force, cli.policy)?;
        }
        Commands::Append { event, time } => {
            let path = cli.image.ok_or("Image path required for append")?;
            commands::append::run(&path, event, time, cli.policy)?;
        }
        Commands::Dump { limit, format } => {
            let path = cli.image.ok_or("Image path required for dump")?;
            commands::dump::run(&path, limit, &format, cli.policy)?;
        }
        Commands::Latest { format } => {
            let path = cli.image.ok_or("Image path required for latest")?;
            commands::dump::run_latest(&path, &format, cli.policy)?;
        }
        Commands::Inspect { format } => {
            let path = cli.image.ok_or("Image path required for inspect")?;
            commands::inspect::run(&path, &format, cli.policy)?;
        }
        Commands::Verify => {
            let path = cli.image.ok_or("Image path required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Wipe => {
            let path = cli.image.ok_or("Image path required for wipe")?;
            commands::init::run_wipe(&path, cli.policy)?;
        }
        Commands::Version => {
            println!("wdlog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("wdlog core v{}", wdlog_core::VERSION);
        }
    }

    Ok(())
}

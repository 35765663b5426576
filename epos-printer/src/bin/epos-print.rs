//! # epos-print
//!
//! Send a JSON layout script to an ePOS-Print receipt printer.
//!
//! ## Usage
//!
//! ```bash
//! # Show the SOAP document without sending it
//! epos-print print --dry-run receipt.json
//!
//! # Print on a device
//! epos-print --host 192.168.1.50 print receipt.json
//!
//! # Check that the device answers
//! EPOS_PRINTER_HOST=192.168.1.50 epos-print status
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use epos_printer::{EposPrinter, LayoutScript, PrintOutcome, PrinterConfig};

/// epos-print - ePOS-Print receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "epos-print")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer host or IP
    #[arg(long, env = "EPOS_PRINTER_HOST", global = true)]
    host: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "EPOS_PRINTER_TIMEOUT_MS", default_value_t = 60_000, global = true)]
    timeout_ms: u64,

    /// Device id on the ePOS-Print service
    #[arg(long, env = "EPOS_DEVICE_ID", default_value = epos_printer::DEFAULT_DEVICE_ID, global = true)]
    device_id: String,

    /// Accept the printer's self-signed certificate
    #[arg(long, env = "EPOS_ACCEPT_INVALID_CERTS", global = true)]
    accept_invalid_certs: bool,

    /// Log as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a layout script
    Print {
        /// JSON layout script
        layout: PathBuf,

        /// Write the SOAP document to stdout instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Check whether the printer answers
    Status,
}

impl Cli {
    fn printer_config(&self) -> anyhow::Result<PrinterConfig> {
        let host = self
            .host
            .as_deref()
            .context("printer host not set (use --host or EPOS_PRINTER_HOST)")?;

        Ok(PrinterConfig::new(host)
            .with_timeout_ms(self.timeout_ms)
            .with_device_id(&self.device_id)
            .with_accept_invalid_certs(self.accept_invalid_certs))
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "epos_printer=info,epos_print=info".into());

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    match &cli.command {
        Commands::Print { layout, dry_run } => {
            let json = std::fs::read_to_string(layout)
                .with_context(|| format!("reading {}", layout.display()))?;
            let builder = LayoutScript::from_json(&json)?.to_builder();

            if *dry_run {
                println!("{}", builder.to_envelope());
                return Ok(ExitCode::SUCCESS);
            }

            let printer = EposPrinter::new(&cli.printer_config()?)?;
            info!(addr = %printer.address(), fragments = builder.len(), "Submitting print job");

            match printer.print(&builder)?.outcome().await {
                PrintOutcome::Success => {
                    info!("Printed");
                    Ok(ExitCode::SUCCESS)
                }
                PrintOutcome::Failure(reason) => {
                    error!(reason = ?reason, "Print failed");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Status => {
            let printer = EposPrinter::new(&cli.printer_config()?)?;
            if printer.is_online().await {
                println!("online");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("offline");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

//! Blocklist importer CLI
//!
//! Imports a contact CSV export (address book or reverse-lookup dump)
//! into a normalized, deduplicated JSON blocklist store.

use blocklist_core::{run_import, ImportOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blocklist-import")]
#[command(about = "Convert a contact CSV export into a blocklist JSON store", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV file to import
    #[arg(long)]
    input: PathBuf,

    /// Country code substituted for a leading national 0, e.g. +41
    #[arg(long)]
    country_code: String,

    /// JSON store to read and then overwrite
    #[arg(long, default_value = "out.json")]
    merge: PathBuf,

    /// Enable verbose diagnostic output
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> blocklist_core::Result<()> {
    let options = ImportOptions {
        input: cli.input.clone(),
        country_code: cli.country_code.clone(),
        merge: cli.merge.clone(),
    };

    let report = run_import(&options)?;

    println!("Imported {}:", cli.input.display());
    println!("  {} records read", report.records_read);
    println!("  {} number candidates extracted", report.candidates_extracted);
    println!("  {} entries dropped (rejected or duplicate)", report.entries_dropped);
    println!("  {} entries in store", report.total_entries);

    if report.store_written {
        println!("Wrote {}", cli.merge.display());
    } else {
        println!("Nothing to write, {} left untouched", cli.merge.display());
    }

    Ok(())
}

/// Log filtering: RUST_LOG wins when set; otherwise --debug raises the
/// level from warn to debug.
fn init_tracing(debug: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let default_level = if debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

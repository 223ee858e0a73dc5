mod cli;

use crate::cli::app::App;
use crate::cli::input::LineReader;
use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use vehicle_registry::{RegistryConfig, VehicleRegistry};

#[derive(Parser)]
#[command(name = "vehicle-registry")]
#[command(about = "Interactive manager for a vehicle collection kept in a tagged text file")]
struct Cli {
    /// Data file the collection is loaded from and saved to
    #[arg(env = "VEHICLES_FILE")]
    file: PathBuf,

    /// Log debug details (RUST_LOG overrides this)
    #[arg(short, long)]
    verbose: bool,
}

/// Filter used when `RUST_LOG` is unset
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(cli.verbose)),
    )
    .init();

    println!("Loading data from file: {}", cli.file.display());
    let registry = VehicleRegistry::open(RegistryConfig::new(&cli.file));
    match registry.load_warning() {
        Some(reason) => {
            eprintln!("Failed to load collection: {}", reason);
            eprintln!("Starting with an empty collection");
        }
        None => println!("Loaded {} elements", registry.show().len()),
    }

    let stdin = io::stdin();
    let mut input = LineReader::new(stdin.lock());
    let mut app = App::new(registry, io::stdout());
    app.run(&mut input, true)
        .context("command loop failed")?;
    Ok(())
}

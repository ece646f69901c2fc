//! Polling utility entry point.
//!
//! This binary runs the waits described by JSON configuration files: each wait
//! re-sends its request until every configured checker passes or its retry
//! budget runs out.
//!
//! # Flow
//! 1. Loads the wait configuration (a single file or a directory)
//! 2. Applies command line overrides to every wait
//! 3. Runs the waits one after another, printing the final response of each
//! 4. Exits with an error when any wait failed

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;

use crate::{
	bootstrap::{load_waits, run_wait, Result, WaitOverrides},
	models::WaitConfig,
	utils::{logging::setup_logging, parse_millis, parse_string_to_bytes_size},
};

use clap::Parser;
use dotenvy::dotenv_override;
use std::env::{set_var, var};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(
	name = "bepatient",
	about = "Re-sends HTTP requests until the responses meet the configured conditions.",
	version
)]
struct Cli {
	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,

	/// Wait configuration file to run
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Directory of wait configuration files (default: config/waits)
	#[arg(long, value_name = "DIR")]
	config_dir: Option<PathBuf>,

	/// Override the attempt budget of every wait
	#[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
	retries: Option<u32>,

	/// Override the pause between attempts, in milliseconds
	#[arg(long, value_name = "MILLIS", value_parser = parse_millis)]
	delay_ms: Option<Duration>,

	/// Report unmet conditions without failing
	#[arg(long)]
	no_raise: bool,

	/// Validate configuration files without running the waits
	#[arg(long)]
	check: bool,
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Reload environment variables from .env file
		// Override any existing environment variables
		dotenv_override().ok();

		// Log file mode - override if CLI flag is set
		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		// Set log level from RUST_LOG if it exists
		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		// Log level - override if CLI flag is set
		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		// Log path - override if CLI flag is set
		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		// Log max size - override if CLI flag is set
		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}
	}

	fn overrides(&self) -> WaitOverrides {
		WaitOverrides {
			retries: self.retries,
			delay: self.delay_ms,
			raise_error: self.no_raise.then_some(false),
		}
	}
}

/// Main entry point of the polling utility.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or if any wait failed.
#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	// Apply CLI options to environment
	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let mut waits = load_waits(cli.config.as_deref(), cli.config_dir.as_deref())
		.await
		.map_err(|e| anyhow::anyhow!("Failed to load wait configuration: {}", e))?;

	// If --check flag is provided, only validate configuration and exit
	if cli.check {
		validate_configuration(&waits);
		return Ok(());
	}

	if waits.is_empty() {
		info!("No waits configured. Exiting...");
		return Ok(());
	}

	let overrides = cli.overrides();
	for wait in &mut waits {
		overrides.apply(wait);
	}

	let mut failed = 0;
	for wait in &waits {
		match run_wait(wait, None).await {
			Ok(report) => {
				println!("[{}] {}", report.name, report.message);
				if let Some(response) = &report.response {
					println!("Status: {}", response.status_code);
					println!("{}", response.text());
				}
			}
			Err(e) => {
				failed += 1;
				error!(wait = %wait.name, "Wait failed: {}", e);
				eprintln!("[{}] {}", wait.name, e.message());
			}
		}
	}

	if failed > 0 {
		return Err(anyhow::anyhow!("{} of {} wait(s) failed", failed, waits.len()).into());
	}
	Ok(())
}

/// Logs a summary of the loaded waits
fn validate_configuration(waits: &[WaitConfig]) {
	info!("Validating configuration files...");

	if waits.is_empty() {
		error!("No waits found. Add wait configuration files to config/waits or pass --config.");
		return;
	}
	for wait in waits {
		info!(
			"✓ {} ({} checker(s), {} attempt(s))",
			wait.name,
			wait.checkers.len(),
			wait.retries
		);
	}

	info!("Configuration validation completed successfully!");
}

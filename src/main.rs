//! bluetuith: a TUI Bluetooth manager
//!
//! Startup resolves the effective configuration from the command line and
//! the per-user config file, validates every option against the local
//! adapters, devices and filesystem, and only then hands it to the
//! application.

use anyhow::Result;

use bluetuith::config::ConfigService;
use bluetuith::domain::ConfigError;
use bluetuith::service::{Startup, StartupOutcome, SystemBluetooth};

fn main() -> Result<()> {
    let config_path = ConfigService::default_path()?;
    let bluetooth = SystemBluetooth::new();

    let outcome = match Startup::new(&bluetooth, config_path).run(std::env::args_os()) {
        Ok(outcome) => outcome,
        // Help, usage and flag errors are printed by clap with its own exit status
        Err(ConfigError::Cli(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    match outcome {
        StartupOutcome::Finished(message) => {
            if let Some(message) = message {
                println!("{}", message);
            }
        }
        StartupOutcome::Ready(config) => {
            if !config.is_enabled("no-warning") {
                for warning in config.warnings() {
                    eprintln!("Warning: {}", warning);
                }
            }
        }
    }

    Ok(())
}

//! Service layer orchestrating startup.

mod bluetooth;
mod startup;

pub use bluetooth::{Bluetooth, SystemBluetooth};
pub use startup::{ResolvedConfig, Startup, StartupOutcome};

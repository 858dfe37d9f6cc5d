//! Domain layer containing the startup validation logic.
//!
//! This module contains:
//! - Adapter, device, adapter-state and GSM types
//! - Theme elements and color validation
//! - Per-option validators and the chain that runs them
//! - Debug logger with rotation

mod error;
pub mod logger;
pub mod theme;
mod types;
pub mod validators;

pub use error::{ConfigError, ThemeError};
pub use types::{Adapter, AdapterProperty, AdapterStates, Device, GsmSettings, State};

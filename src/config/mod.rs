//! Configuration management module.
//!
//! Handles config file loading, flag layering, the property store and
//! config generation.

mod service;
mod types;

pub use service::{ConfigService, LoadedConfig, CONFIG_FILE_NAME};
pub use types::{Properties, PropertyValue};

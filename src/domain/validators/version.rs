//! `--version` action.

use super::{Flow, Resolution, Validator};
use crate::domain::ConfigError;

/// Version string in `version@build` form; the build part is optional.
pub const VERSION: &str = match option_env!("BLUETUITH_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Render a `version@build` string for display.
pub fn version_text(encoded: &str) -> String {
    match encoded.split_once('@') {
        Some((version, build)) => format!("Bluetuith v{} ({})", version, build),
        None => format!("Bluetuith v{}", encoded),
    }
}

/// Prints version information and ends startup.
pub struct VersionValidator;

impl Validator for VersionValidator {
    fn name(&self) -> &'static str {
        "version"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        if !resolution.properties.is_enabled("version") {
            return Ok(Flow::Continue);
        }

        Ok(Flow::Exit(Some(version_text(VERSION))))
    }
}

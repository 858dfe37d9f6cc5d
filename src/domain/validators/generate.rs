//! `--generate` action.

use super::{Flow, Resolution, Validator};
use crate::config::ConfigService;
use crate::domain::ConfigError;

/// Writes the effective configuration to the config file and ends startup.
pub struct GenerateValidator;

impl Validator for GenerateValidator {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        if !resolution.properties.is_enabled("generate") {
            return Ok(Flow::Continue);
        }

        ConfigService::generate_at(resolution.config_path, &resolution.properties)?;

        Ok(Flow::Exit(Some(format!(
            "Configuration generated at {}",
            resolution.config_path.display()
        ))))
    }
}

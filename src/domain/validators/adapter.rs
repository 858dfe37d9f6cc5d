//! Adapter selection.

use tracing::{debug, warn};

use super::{Flow, Resolution, Validator};
use crate::domain::ConfigError;

/// Resolves `adapter` against the live adapter list.
pub struct AdapterValidator;

impl Validator for AdapterValidator {
    fn name(&self) -> &'static str {
        "adapter"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        let requested = resolution.properties.get("adapter");

        if requested.is_empty() {
            resolution.adapter = resolution.bluetooth.default_adapter();
            match &resolution.adapter {
                Some(adapter) => debug!("Using default adapter {}", adapter.id()),
                None => warn!("No Bluetooth adapters found"),
            }
            return Ok(Flow::Continue);
        }

        let adapter = resolution
            .bluetooth
            .adapters()
            .into_iter()
            .find(|a| a.id() == requested)
            .ok_or_else(|| ConfigError::AdapterNotFound(requested.to_string()))?;

        debug!("Using adapter {} ({})", adapter.id(), adapter.name);
        resolution.adapter = Some(adapter);

        Ok(Flow::Continue)
    }
}

//! `connect-bdaddr` lookup.

use tracing::debug;

use super::{Flow, Resolution, Validator};
use crate::domain::ConfigError;

/// Checks that the requested device is known to the current adapter.
pub struct ConnectBdaddrValidator;

impl Validator for ConnectBdaddrValidator {
    fn name(&self) -> &'static str {
        "connect-bdaddr"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        let address = resolution.properties.get("connect-bdaddr").to_string();
        if address.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(adapter) = &resolution.adapter else {
            debug!("No adapter selected, skipping device lookup for {}", address);
            return Ok(Flow::Continue);
        };

        let device = resolution
            .bluetooth
            .devices(adapter)
            .into_iter()
            .find(|d| d.address == address)
            .ok_or_else(|| ConfigError::DeviceNotFound {
                address: address.clone(),
                adapter_name: adapter.name.clone(),
                adapter_id: adapter.id().to_string(),
            })?;

        resolution.properties.set("connect-bdaddr", device.address);

        Ok(Flow::Continue)
    }
}

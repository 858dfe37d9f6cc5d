//! `--list-adapters` action.

use super::{Flow, Resolution, Validator};
use crate::domain::ConfigError;

/// Prints the adapter identifiers and ends startup.
pub struct ListAdaptersValidator;

impl Validator for ListAdaptersValidator {
    fn name(&self) -> &'static str {
        "list-adapters"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        if !resolution.properties.is_enabled("list-adapters") {
            return Ok(Flow::Continue);
        }

        let mut listing = String::from("List of adapters:");
        for adapter in resolution.bluetooth.adapters() {
            listing.push_str("\n- ");
            listing.push_str(adapter.id());
        }

        Ok(Flow::Exit(Some(listing)))
    }
}

//! Dial-up networking parameters.

use super::{Flow, Resolution, Validator};
use crate::domain::{ConfigError, GsmSettings};

/// Resolves `gsm-apn` and `gsm-number` together.
pub struct GsmValidator;

impl Validator for GsmValidator {
    fn name(&self) -> &'static str {
        "gsm"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        let gsm = GsmSettings::resolve(
            resolution.properties.get("gsm-apn"),
            resolution.properties.get("gsm-number"),
        )?;

        resolution.properties.set("gsm-apn", gsm.apn);
        resolution.properties.set("gsm-number", gsm.number);

        Ok(Flow::Continue)
    }
}

//! Validator chain implementation.

use tracing::debug;

use crate::domain::ConfigError;

use super::{
    AdapterStatesValidator, AdapterValidator, ConnectBdaddrValidator, Flow, GenerateValidator,
    GsmValidator, ListAdaptersValidator, ReceiveDirValidator, Resolution, ThemeValidator,
    Validator, VersionValidator,
};

/// Validators in the fixed order startup runs them.
pub struct ValidatorChain {
    validators: Vec<Box<dyn Validator>>,
}

impl Default for ValidatorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorChain {
    pub fn new() -> Self {
        // Adapter selection comes first: connect-bdaddr looks up devices on it.
        // Generate and version come last so they only act on a valid config.
        let validators: Vec<Box<dyn Validator>> = vec![
            Box::new(AdapterValidator),
            Box::new(ListAdaptersValidator),
            Box::new(AdapterStatesValidator),
            Box::new(ConnectBdaddrValidator),
            Box::new(ReceiveDirValidator),
            Box::new(GsmValidator),
            Box::new(ThemeValidator),
            Box::new(GenerateValidator),
            Box::new(VersionValidator),
        ];

        Self { validators }
    }

    /// Names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run every validator; stop at the first error or terminal action.
    pub fn execute(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        for validator in &self.validators {
            let flow = validator.validate(resolution)?;
            debug!("Validated {}: {:?}", validator.name(), flow);

            if let Flow::Exit(_) = flow {
                return Ok(flow);
            }
        }

        Ok(Flow::Continue)
    }
}

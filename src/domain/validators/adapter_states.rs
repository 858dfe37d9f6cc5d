//! `adapter-states` parsing.

use tracing::debug;

use super::{Flow, Resolution, Validator};
use crate::domain::{AdapterStates, ConfigError};

/// Replaces the raw `adapter-states` string with its parsed table.
pub struct AdapterStatesValidator;

impl Validator for AdapterStatesValidator {
    fn name(&self) -> &'static str {
        "adapter-states"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        let raw = resolution.properties.get("adapter-states");
        if raw.is_empty() {
            return Ok(Flow::Continue);
        }

        // Parsed in full before anything is stored.
        let states = AdapterStates::parse(raw)?;
        debug!("Adapter states: {}", states);

        resolution
            .properties
            .set("adapter-states", states.to_value());

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validators::testing::{properties, FakeBluetooth};
    use crate::domain::{AdapterProperty, State};
    use std::path::Path;

    #[test]
    fn test_stores_table_with_sequence() {
        let bt = FakeBluetooth::default();
        let props = properties(&[("adapter-states", "scan:on,powered:off")]);
        let mut r = Resolution::new(props, &bt, Path::new("/unused"));

        AdapterStatesValidator.validate(&mut r).unwrap();

        let stored = r.properties.value("adapter-states").unwrap();
        let states = AdapterStates::from_value(stored).unwrap();
        assert_eq!(states.get(AdapterProperty::Scan), Some(State::Yes));
        assert_eq!(states.get(AdapterProperty::Powered), Some(State::No));
        assert_eq!(
            states.sequence,
            vec![AdapterProperty::Scan, AdapterProperty::Powered]
        );
    }

    #[test]
    fn test_bad_token_stores_nothing() {
        let bt = FakeBluetooth::default();
        let input = "powered: yes, scan:off, Pairable:Yes";
        let props = properties(&[("adapter-states", input)]);
        let mut r = Resolution::new(props, &bt, Path::new("/unused"));

        let err = AdapterStatesValidator.validate(&mut r).unwrap_err();

        assert!(err.to_string().starts_with("Provided property 'Pairable' is incorrect."));
        assert_eq!(r.properties.get("adapter-states"), input);
    }

    #[test]
    fn test_second_run_is_noop() {
        let bt = FakeBluetooth::default();
        let props = properties(&[("adapter-states", "pairable:y")]);
        let mut r = Resolution::new(props, &bt, Path::new("/unused"));

        AdapterStatesValidator.validate(&mut r).unwrap();
        let first = r.properties.clone();
        AdapterStatesValidator.validate(&mut r).unwrap();
        assert_eq!(r.properties, first);
    }
}

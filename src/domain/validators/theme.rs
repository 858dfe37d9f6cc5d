//! Theme resolution.

use tracing::debug;

use super::{Flow, Resolution, Validator};
use crate::config::PropertyValue;
use crate::domain::theme::Theme;
use crate::domain::ConfigError;

/// Parses an inline theme and validates its elements and colors.
pub struct ThemeValidator;

impl Validator for ThemeValidator {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        let value = match resolution.properties.value("theme") {
            None => return Ok(Flow::Continue),
            Some(PropertyValue::Text(text)) if text.trim().is_empty() => {
                return Ok(Flow::Continue)
            }
            Some(PropertyValue::Text(text)) => {
                let parsed: serde_json::Value = json5::from_str(text)
                    .map_err(|e| ConfigError::InvalidThemeFormat(e.to_string()))?;
                PropertyValue::from_json(parsed)
            }
            Some(other) => other.clone(),
        };

        let map = value.flatten();
        resolution.properties.set("theme", value);
        if map.is_empty() {
            return Ok(Flow::Continue);
        }

        let theme = Theme::from_map(&map)?;
        debug!("Theme sets {} elements", theme.len());
        resolution.theme = Some(theme);

        Ok(Flow::Continue)
    }
}

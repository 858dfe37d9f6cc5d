//! Error types for bluetuith startup.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup error.
///
/// Every variant aborts startup at the point of detection; there is no retry
/// and no partially resolved configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Flag syntax error, surfaced with clap's own text
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The per-user config directory could not be determined
    #[error("Cannot get config directory")]
    ConfigDir,

    /// Config file exists but could not be read or parsed
    #[error("{}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },

    /// An adapter-states token does not split into property and state
    #[error("Provided property:state format '{token}' is incorrect.")]
    InvalidStateFormat { token: String },

    /// Unknown adapter property
    #[error("Provided property '{property}' is incorrect.\nValid properties are '{valid}'.")]
    InvalidProperty { property: String, valid: String },

    /// Unknown state synonym
    #[error(
        "Provided state '{state}' for property '{property}' is incorrect.\nValid states are '{valid}'."
    )]
    InvalidState {
        state: String,
        property: String,
        valid: String,
    },

    /// No adapter with the requested identifier
    #[error("{0}: The adapter does not exist.")]
    AdapterNotFound(String),

    /// No device with the requested address on the current adapter
    #[error("No device with address '{address}' found on adapter '{adapter_name}' ({adapter_id})")]
    DeviceNotFound {
        address: String,
        adapter_name: String,
        adapter_id: String,
    },

    /// Receive directory is missing or not a directory
    #[error("{}: Directory is not accessible.", .0.display())]
    DirectoryNotAccessible(PathBuf),

    /// An APN was given without a number to dial
    #[error("Specify GSM Number.")]
    GsmNumberRequired,

    /// Inline theme text is not valid JSON5
    #[error("Provided theme format is invalid: {0}")]
    InvalidThemeFormat(String),

    /// Theme elements or colors were rejected
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Theme validation error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    /// Element name is not one the renderer knows
    #[error("Theme element '{0}' is invalid.")]
    UnknownElement(String),

    /// Color value cannot be parsed
    #[error("Color '{color}' for theme element '{element}' is invalid.")]
    InvalidColor { element: String, color: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_diagnostics() {
        assert_eq!(
            ConfigError::AdapterNotFound("hci3".to_string()).to_string(),
            "hci3: The adapter does not exist."
        );
        assert_eq!(
            ConfigError::DirectoryNotAccessible(PathBuf::from("/nope")).to_string(),
            "/nope: Directory is not accessible."
        );
        assert_eq!(
            ConfigError::GsmNumberRequired.to_string(),
            "Specify GSM Number."
        );
        assert_eq!(
            ConfigError::InvalidStateFormat {
                token: "powered".to_string()
            }
            .to_string(),
            "Provided property:state format 'powered' is incorrect."
        );
    }

    #[test]
    fn test_theme_error_is_transparent() {
        let err: ConfigError = ThemeError::UnknownElement("Foo".to_string()).into();
        assert_eq!(err.to_string(), "Theme element 'Foo' is invalid.");
    }
}

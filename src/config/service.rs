//! Configuration service for loading, layering and generating config files.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::ArgMatches;
use tracing::debug;

use super::types::{Properties, PropertyValue};
use crate::cli::{self, OptionKind, OPTIONS};
use crate::domain::{AdapterStates, ConfigError};

/// File name of the per-user configuration file.
pub const CONFIG_FILE_NAME: &str = "bluetuith.conf";

/// Result of layering the config file and the command line.
#[derive(Debug)]
pub struct LoadedConfig {
    pub properties: Properties,

    /// Non-fatal findings, e.g. keys no option recognizes
    pub warnings: Vec<String>,
}

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Per-user configuration file path (`<config dir>/bluetuith/bluetuith.conf`).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|d| d.join("bluetuith").join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::ConfigDir)
    }

    /// Directory receiving debug logs for a given config file.
    pub fn log_dir(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("logs")
    }

    /// Parse `args`, read the config file, and overlay explicit flags on the
    /// file values.
    ///
    /// A missing or blank config file is not an error; a malformed one is.
    pub fn load<I, T>(path: &Path, args: I) -> Result<LoadedConfig, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = cli::command(path).try_get_matches_from(args)?;

        let mut properties = Self::read_file(path)?;
        let warnings = unknown_keys(&properties);

        overlay_flags(&mut properties, &matches);

        Ok(LoadedConfig {
            properties,
            warnings,
        })
    }

    /// Read the config file into a property store.
    pub fn read_file(path: &Path) -> Result<Properties, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Properties::new());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(Properties::new());
        }

        let document: serde_json::Value =
            json5::from_str(&content).map_err(|e| ConfigError::ConfigFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let properties = match PropertyValue::from_json(document) {
            PropertyValue::Table(values) => Properties::from(values),
            _ => {
                return Err(ConfigError::ConfigFile {
                    path: path.to_path_buf(),
                    message: "configuration must be an object".to_string(),
                })
            }
        };

        if let Some(message) = mistyped_value(&properties) {
            return Err(ConfigError::ConfigFile {
                path: path.to_path_buf(),
                message,
            });
        }

        Ok(properties)
    }

    /// Write the effective configuration to `path`, creating parent
    /// directories as needed.
    pub fn generate_at(path: &Path, properties: &Properties) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::render(properties))?;
        debug!("Generated configuration at {}", path.display());

        Ok(())
    }

    /// Render the options as a commented JSON5 document.
    fn render(properties: &Properties) -> String {
        let mut out = String::from("{\n");

        for option in OPTIONS.iter().filter(|o| !o.is_action()) {
            let value = match (option.name, properties.value(option.name)) {
                ("adapter-states", Some(value @ PropertyValue::Table(_))) => {
                    AdapterStates::from_value(value)
                        .map(|s| PropertyValue::Text(s.to_string()))
                        .unwrap_or_else(|| value.clone())
                }
                ("theme", None) => PropertyValue::Table(Default::default()),
                (_, Some(value)) => value.clone(),
                (_, None) => default_value(option.kind, option.default),
            };

            // Serializing a PropertyValue cannot fail: keys are strings.
            let rendered = serde_json::to_string(&value).unwrap_or_default();
            out.push_str(&format!(
                "  // {}\n  \"{}\": {},\n\n",
                option.description, option.name, rendered
            ));
        }

        out.push_str("}\n");
        out
    }
}

fn default_value(kind: OptionKind, default: &str) -> PropertyValue {
    match kind {
        OptionKind::Boolean => PropertyValue::Flag(false),
        OptionKind::String { .. } => PropertyValue::Text(default.to_string()),
    }
}

/// Flags given on the command line replace file values. Flags left unset
/// only fill keys the file did not provide.
fn overlay_flags(properties: &mut Properties, matches: &ArgMatches) {
    for option in OPTIONS {
        let explicit = matches.value_source(option.name) == Some(ValueSource::CommandLine);

        if explicit {
            match option.kind {
                OptionKind::Boolean => {
                    let enabled = matches
                        .get_one::<bool>(option.name)
                        .copied()
                        .unwrap_or(true);
                    properties.set(option.name, enabled);
                }
                OptionKind::String { .. } => {
                    let value = matches
                        .get_one::<String>(option.name)
                        .cloned()
                        .unwrap_or_default();
                    properties.set(option.name, value);
                }
            }
        } else if !properties.contains(option.name) {
            properties.set(option.name, default_value(option.kind, option.default));
        }
    }
}

/// First known option whose file value has the wrong shape. Only `theme`
/// may be an object; unknown keys are left to the warnings.
fn mistyped_value(properties: &Properties) -> Option<String> {
    OPTIONS.iter().find_map(|option| {
        let value = properties.value(option.name)?;
        let accepted = match (option.kind, value) {
            (OptionKind::Boolean, PropertyValue::Flag(_)) => true,
            (OptionKind::Boolean, PropertyValue::Text(s)) => s == "true" || s == "false",
            (OptionKind::String { .. }, PropertyValue::Text(_)) => true,
            (OptionKind::String { .. }, PropertyValue::Table(_)) => option.name == "theme",
            _ => false,
        };

        let expected = match option.kind {
            OptionKind::Boolean => "a boolean",
            OptionKind::String { .. } if option.name == "theme" => "a string or an object",
            OptionKind::String { .. } => "a string",
        };
        (!accepted).then(|| format!("'{}' must be {}", option.name, expected))
    })
}

fn unknown_keys(properties: &Properties) -> Vec<String> {
    properties
        .keys()
        .filter(|k| cli::option(k).is_none())
        .map(|k| format!("Unknown configuration key '{}' ignored.", k))
        .collect()
}

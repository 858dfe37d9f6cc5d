//! Core domain types consumed by the validators.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::config::PropertyValue;

use super::ConfigError;

/// A local Bluetooth controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// Human readable adapter name (alias)
    pub name: String,

    /// Object path, e.g. `/org/bluez/hci0`
    pub path: String,
}

impl Adapter {
    /// Short identifier: the base segment of the object path (`hci0`).
    pub fn id(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(self.path.as_str())
    }
}

/// A device known to an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Colon separated hardware address
    pub address: String,

    /// Device name, if BlueZ recorded one
    pub name: Option<String>,
}

/// Adapter capability that can be toggled at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdapterProperty {
    Powered,
    Scan,
    Discoverable,
    Pairable,
}

impl AdapterProperty {
    /// All properties, in the order they are listed in diagnostics.
    pub const ALL: [AdapterProperty; 4] = [
        AdapterProperty::Powered,
        AdapterProperty::Scan,
        AdapterProperty::Discoverable,
        AdapterProperty::Pairable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterProperty::Powered => "powered",
            AdapterProperty::Scan => "scan",
            AdapterProperty::Discoverable => "discoverable",
            AdapterProperty::Pairable => "pairable",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for AdapterProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical adapter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Yes,
    No,
}

impl State {
    /// Accepted spellings, in the order they are listed in diagnostics.
    pub const SYNONYMS: [&'static str; 6] = ["yes", "no", "y", "n", "on", "off"];

    /// Normalize a state synonym.
    pub fn from_synonym(value: &str) -> Option<Self> {
        match value {
            "yes" | "y" | "on" => Some(State::Yes),
            "no" | "n" | "off" => Some(State::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Yes => "yes",
            State::No => "no",
        }
    }
}

/// Parsed `adapter-states` option.
///
/// `states` holds the last state given for each property, while `sequence`
/// keeps every property in input order so consumers can replay the toggles
/// the way the user wrote them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterStates {
    pub states: BTreeMap<AdapterProperty, State>,
    pub sequence: Vec<AdapterProperty>,
}

/// Key holding the ordered property list inside the stored table.
const SEQUENCE_KEY: &str = "sequence";

impl AdapterStates {
    /// Parse a comma separated list of `property:state` (or `property state`)
    /// tokens. The first bad token rejects the whole list.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut parsed = AdapterStates::default();

        for token in input.split(',') {
            let fields: Vec<&str> = token
                .split(|c: char| c == ' ' || c == ':')
                .filter(|f| !f.is_empty())
                .collect();
            let [property, state] = fields.as_slice() else {
                return Err(ConfigError::InvalidStateFormat {
                    token: token.to_string(),
                });
            };

            let property =
                AdapterProperty::from_name(property).ok_or_else(|| ConfigError::InvalidProperty {
                    property: property.to_string(),
                    valid: AdapterProperty::ALL.map(|p| p.as_str()).join(", "),
                })?;

            let state = State::from_synonym(state).ok_or_else(|| ConfigError::InvalidState {
                state: state.to_string(),
                property: property.to_string(),
                valid: State::SYNONYMS.join(", "),
            })?;

            parsed.states.insert(property, state);
            parsed.sequence.push(property);
        }

        Ok(parsed)
    }

    /// The state last requested for `property`.
    pub fn get(&self, property: AdapterProperty) -> Option<State> {
        self.states.get(&property).copied()
    }

    /// Replay the requested toggles in input order.
    pub fn ordered(&self) -> impl Iterator<Item = (AdapterProperty, State)> + '_ {
        self.sequence
            .iter()
            .filter_map(|p| self.get(*p).map(|s| (*p, s)))
    }

    /// Structured form stored under `adapter-states`.
    pub fn to_value(&self) -> PropertyValue {
        let mut table: BTreeMap<String, PropertyValue> = self
            .states
            .iter()
            .map(|(p, s)| (p.as_str().to_string(), PropertyValue::Text(s.as_str().to_string())))
            .collect();
        table.insert(
            SEQUENCE_KEY.to_string(),
            PropertyValue::List(self.sequence.iter().map(|p| p.as_str().to_string()).collect()),
        );
        PropertyValue::Table(table)
    }

    /// Rebuild from the structured form written by [`AdapterStates::to_value`].
    pub fn from_value(value: &PropertyValue) -> Option<Self> {
        let PropertyValue::Table(table) = value else {
            return None;
        };

        let mut parsed = AdapterStates::default();
        for (key, state) in table {
            if let (Some(property), PropertyValue::Text(state)) =
                (AdapterProperty::from_name(key), state)
            {
                parsed.states.insert(property, State::from_synonym(state)?);
            }
        }
        if let Some(PropertyValue::List(sequence)) = table.get(SEQUENCE_KEY) {
            parsed.sequence = sequence
                .iter()
                .filter_map(|p| AdapterProperty::from_name(p))
                .collect();
        }

        Some(parsed)
    }
}

/// Canonical `property:state` text; parses back to an equal value.
impl fmt::Display for AdapterStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self
            .ordered()
            .map(|(p, s)| format!("{}:{}", p, s.as_str()))
            .collect();
        f.write_str(&tokens.join(","))
    }
}

/// Dial-up networking parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsmSettings {
    pub apn: String,
    pub number: String,
}

impl GsmSettings {
    /// Number dialed when only the defaults are in effect.
    pub const DEFAULT_NUMBER: &'static str = "*99#";

    /// Resolve the APN/number pair. An APN without a number is rejected
    /// rather than silently defaulted.
    pub fn resolve(apn: &str, number: &str) -> Result<Self, ConfigError> {
        if number.is_empty() && !apn.is_empty() {
            return Err(ConfigError::GsmNumberRequired);
        }

        let number = if number.is_empty() {
            Self::DEFAULT_NUMBER
        } else {
            number
        };

        Ok(Self {
            apn: apn.to_string(),
            number: number.to_string(),
        })
    }
}

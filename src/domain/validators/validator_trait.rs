//! Validator trait and the state it works on.

use std::path::Path;

use crate::config::Properties;
use crate::domain::theme::Theme;
use crate::domain::{Adapter, ConfigError};
use crate::service::Bluetooth;

/// What startup does after a validator ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Run the next validator
    Continue,
    /// Informational action finished; print the message (if any) and exit 0
    Exit(Option<String>),
}

/// State threaded through the validator chain.
///
/// Only the chain holds this mutably; once every validator has run it is
/// frozen into a [`ResolvedConfig`](crate::service::ResolvedConfig).
pub struct Resolution<'a> {
    pub properties: Properties,
    pub bluetooth: &'a dyn Bluetooth,
    pub config_path: &'a Path,

    /// Adapter selected by the `adapter` validator
    pub adapter: Option<Adapter>,

    /// Theme built by the `theme` validator
    pub theme: Option<Theme>,
}

impl<'a> Resolution<'a> {
    pub fn new(properties: Properties, bluetooth: &'a dyn Bluetooth, config_path: &'a Path) -> Self {
        Self {
            properties,
            bluetooth,
            config_path,
            adapter: None,
            theme: None,
        }
    }
}

/// Trait for per-option validators.
///
/// A validator either leaves the store untouched (option not supplied),
/// writes back a normalized value, or fails. Running it twice yields the
/// same result.
pub trait Validator {
    /// Option the validator is responsible for.
    fn name(&self) -> &'static str;

    /// Check and normalize the option.
    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError>;
}

//! bluetuith startup configuration.
//!
//! Resolves the effective configuration once, before the application starts:
//!
//! 1. [`cli::OPTIONS`] defines every option and builds the flag parser
//! 2. [`config::ConfigService`] layers flags over the JSON5 config file
//! 3. [`domain::validators`] check and normalize each option in a fixed order
//! 4. [`service::Startup`] runs the above and freezes the result into a
//!    [`service::ResolvedConfig`]

pub mod cli;
pub mod config;
pub mod domain;
pub mod service;

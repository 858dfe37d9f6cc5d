//! Per-option validators run once at startup.

mod adapter;
mod adapter_states;
mod chain;
mod connect_bdaddr;
mod generate;
mod gsm;
mod list_adapters;
mod receive_dir;
mod theme;
mod validator_trait;
mod version;

pub use adapter::AdapterValidator;
pub use adapter_states::AdapterStatesValidator;
pub use chain::ValidatorChain;
pub use connect_bdaddr::ConnectBdaddrValidator;
pub use generate::GenerateValidator;
pub use gsm::GsmValidator;
pub use list_adapters::ListAdaptersValidator;
pub use receive_dir::ReceiveDirValidator;
pub use theme::ThemeValidator;
pub use validator_trait::{Flow, Resolution, Validator};
pub use version::{version_text, VersionValidator, VERSION};

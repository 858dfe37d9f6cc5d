//! Startup orchestration: load once, validate in order, freeze.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{ConfigService, Properties};
use crate::domain::logger;
use crate::domain::theme::Theme;
use crate::domain::validators::{Flow, Resolution, ValidatorChain};
use crate::domain::{Adapter, AdapterStates, ConfigError, GsmSettings};
use crate::service::Bluetooth;

/// Validated configuration handed to the rest of the application.
///
/// Read-only: the property store can no longer be written once startup
/// has returned it.
#[derive(Debug)]
pub struct ResolvedConfig {
    properties: Properties,
    adapter: Option<Adapter>,
    theme: Option<Theme>,
    warnings: Vec<String>,
}

impl ResolvedConfig {
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Adapter to operate on, if any adapter exists.
    pub fn adapter(&self) -> Option<&Adapter> {
        self.adapter.as_ref()
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Non-fatal findings collected while loading.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.properties.is_enabled(name)
    }

    pub fn adapter_states(&self) -> Option<AdapterStates> {
        self.properties
            .value("adapter-states")
            .and_then(AdapterStates::from_value)
    }

    pub fn connect_bdaddr(&self) -> Option<&str> {
        Some(self.properties.get("connect-bdaddr")).filter(|a| !a.is_empty())
    }

    pub fn receive_dir(&self) -> Option<PathBuf> {
        Some(self.properties.get("receive-dir"))
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
    }

    pub fn gsm(&self) -> GsmSettings {
        GsmSettings {
            apn: self.properties.get("gsm-apn").to_string(),
            number: self.properties.get("gsm-number").to_string(),
        }
    }
}

/// How startup ended.
#[derive(Debug)]
pub enum StartupOutcome {
    /// Configuration is valid; continue into the application
    Ready(ResolvedConfig),
    /// An informational action ran; print the message and exit successfully
    Finished(Option<String>),
}

/// Startup orchestrator.
pub struct Startup<'a> {
    bluetooth: &'a dyn Bluetooth,
    config_path: PathBuf,
    chain: ValidatorChain,
}

impl<'a> Startup<'a> {
    pub fn new(bluetooth: &'a dyn Bluetooth, config_path: impl Into<PathBuf>) -> Self {
        Self {
            bluetooth,
            config_path: config_path.into(),
            chain: ValidatorChain::new(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Resolve the configuration from `args` (program name first).
    pub fn run<I, T>(&self, args: I) -> Result<StartupOutcome, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let loaded = ConfigService::load(&self.config_path, args)?;
        let mut warnings = loaded.warnings;

        if loaded.properties.is_enabled("debug") {
            let log_dir = ConfigService::log_dir(&self.config_path);
            // Logging is best effort; startup does not depend on it.
            if let Err(e) = logger::init(&log_dir) {
                warnings.push(format!("Debug logging disabled: {e:#}"));
            }
        }

        let mut resolution = Resolution::new(loaded.properties, self.bluetooth, &self.config_path);

        if let Flow::Exit(message) = self.chain.execute(&mut resolution)? {
            return Ok(StartupOutcome::Finished(message));
        }

        let Resolution {
            properties,
            adapter,
            theme,
            ..
        } = resolution;

        info!(
            "Configuration resolved from {} (adapter: {})",
            self.config_path.display(),
            adapter.as_ref().map(Adapter::id).unwrap_or("none")
        );

        Ok(StartupOutcome::Ready(ResolvedConfig {
            properties,
            adapter,
            theme,
            warnings,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validators::testing::FakeBluetooth;
    use crate::domain::{AdapterProperty, State};
    use std::fs;
    use tempfile::TempDir;

    fn startup_with<'a>(
        bt: &'a FakeBluetooth,
        dir: &TempDir,
        content: Option<&str>,
    ) -> Startup<'a> {
        let path = dir.path().join("bluetuith.conf");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        Startup::new(bt, path)
    }

    fn ready(outcome: StartupOutcome) -> ResolvedConfig {
        match outcome {
            StartupOutcome::Ready(config) => config,
            StartupOutcome::Finished(m) => panic!("unexpected exit: {m:?}"),
        }
    }

    #[test]
    fn test_resolves_file_and_flags() {
        let dir = TempDir::new().unwrap();
        let bt = FakeBluetooth::with_adapters(&["hci0", "hci1"])
            .with_device("hci1", "AA:BB:CC:DD:EE:FF");
        let content = format!(
            r#"{{
                adapter: "hci0",
                "receive-dir": "{}",
                "gsm-apn": "internet",
                "gsm-number": "*99***1#",
                theme: {{ Adapter: "red" }},
            }}"#,
            dir.path().display()
        );
        let startup = startup_with(&bt, &dir, Some(&content));

        let config = ready(
            startup
                .run([
                    "bluetuith",
                    "--adapter",
                    "hci1",
                    "--connect-bdaddr",
                    "AA:BB:CC:DD:EE:FF",
                    "--adapter-states",
                    "scan:on,powered:off",
                    "--confirm-on-quit",
                ])
                .unwrap(),
        );

        assert_eq!(config.adapter().unwrap().id(), "hci1");
        assert_eq!(config.connect_bdaddr(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(config.receive_dir().unwrap(), dir.path());
        assert_eq!(
            config.gsm(),
            GsmSettings {
                apn: "internet".to_string(),
                number: "*99***1#".to_string()
            }
        );
        let states = config.adapter_states().unwrap();
        assert_eq!(states.get(AdapterProperty::Scan), Some(State::Yes));
        assert_eq!(
            states.sequence,
            vec![AdapterProperty::Scan, AdapterProperty::Powered]
        );
        assert!(config.theme().unwrap().color("Adapter").is_some());
        assert!(config.is_enabled("confirm-on-quit"));
        assert!(!config.is_enabled("no-help-display"));
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let bt = FakeBluetooth::default();
        let config = ready(startup_with(&bt, &dir, None).run(["bluetuith"]).unwrap());

        assert!(config.adapter().is_none());
        assert!(config.adapter_states().is_none());
        assert!(config.connect_bdaddr().is_none());
        assert!(config.receive_dir().is_none());
        assert!(config.theme().is_none());
        assert_eq!(config.gsm().number, "*99#");
    }

    #[test]
    fn test_validation_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bt = FakeBluetooth::default();
        let err = startup_with(&bt, &dir, Some(r#"{ "gsm-apn": "internet" }"#))
            .run(["bluetuith"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::GsmNumberRequired));
    }

    #[test]
    fn test_flag_fixes_file_value() {
        let dir = TempDir::new().unwrap();
        let bt = FakeBluetooth::default();
        let config = ready(
            startup_with(&bt, &dir, Some(r#"{ "gsm-apn": "internet" }"#))
                .run(["bluetuith", "--gsm-number", "555"])
                .unwrap(),
        );
        assert_eq!(config.gsm().number, "555");
    }

    #[test]
    fn test_logger_failure_becomes_a_warning() {
        let dir = TempDir::new().unwrap();
        // A regular file where the config directory should be
        let blocker = dir.path().join("bluetuith");
        fs::write(&blocker, "").unwrap();
        let bt = FakeBluetooth::default();

        let config = ready(
            Startup::new(&bt, blocker.join("bluetuith.conf"))
                .run(["bluetuith", "--debug"])
                .unwrap(),
        );

        assert_eq!(config.warnings().len(), 1);
        assert!(config.warnings()[0].starts_with("Debug logging disabled:"));
        assert!(config.is_enabled("debug"));
    }

    #[test]
    fn test_version_finishes() {
        let dir = TempDir::new().unwrap();
        let bt = FakeBluetooth::default();
        let outcome = startup_with(&bt, &dir, None)
            .run(["bluetuith", "--version"])
            .unwrap();
        assert!(matches!(
            outcome,
            StartupOutcome::Finished(Some(ref m)) if m.starts_with("Bluetuith v")
        ));
    }

    #[test]
    fn test_generate_writes_to_config_path() {
        let dir = TempDir::new().unwrap();
        let bt = FakeBluetooth::default();
        let startup = startup_with(&bt, &dir, None);

        let outcome = startup
            .run(["bluetuith", "--generate", "--adapter-states", "powered:on"])
            .unwrap();

        assert!(matches!(outcome, StartupOutcome::Finished(Some(_))));
        let content = fs::read_to_string(startup.config_path()).unwrap();
        assert!(content.contains(r#""adapter-states": "powered:yes""#));
    }
}

//! Option schema and command-line definition.
//!
//! [`OPTIONS`] is the only list of option names: the flag parser, the config
//! loader and the generated config file all iterate it.

use std::path::Path;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::domain::theme;

/// Value kind of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Switch, defaults to false; `--name=false` turns it off explicitly
    Boolean,
    /// Free-form string; `value_name` is shown in the help output
    String { value_name: &'static str },
}

/// A recognized option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub default: &'static str,
}

impl OptionDescriptor {
    const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: OptionKind::Boolean,
            default: "",
        }
    }

    const fn string(
        name: &'static str,
        value_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            kind: OptionKind::String { value_name },
            default: "",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, OptionKind::Boolean)
    }

    /// Actions that run once and end the process; never written to the config file.
    pub fn is_action(&self) -> bool {
        matches!(self.name, "list-adapters" | "generate" | "version")
    }
}

/// Every recognized option, in help order.
pub const OPTIONS: &[OptionDescriptor] = &[
    OptionDescriptor::boolean("list-adapters", "List available adapters."),
    OptionDescriptor::string(
        "adapter",
        "adapter",
        "Specify an adapter to use. (For example, hci0)",
    ),
    OptionDescriptor::string(
        "receive-dir",
        "dir",
        "Specify a directory to store received files.",
    ),
    OptionDescriptor::string(
        "gsm-apn",
        "apn",
        "Specify GSM APN to connect to. (Required for DUN)",
    ),
    OptionDescriptor::string(
        "gsm-number",
        "number",
        "Specify GSM number to dial. (Required for DUN)",
    ),
    OptionDescriptor::string(
        "adapter-states",
        "property:state",
        "Specify adapter states to enable/disable. (For example, 'powered:yes,discoverable:yes,pairable:yes,scan:no')",
    ),
    OptionDescriptor::string(
        "connect-bdaddr",
        "address",
        "Specify device address to connect (For example, 'AA:BB:CC:DD:EE:FF')",
    ),
    OptionDescriptor::string(
        "theme",
        "theme",
        "Specify a theme in the JSON5 format. (For example, '{ Adapter: \"red\" }')",
    ),
    OptionDescriptor::boolean(
        "no-warning",
        "Do not display warnings when the application has initialized.",
    ),
    OptionDescriptor::boolean(
        "no-help-display",
        "Do not display help keybindings in the application.",
    ),
    OptionDescriptor::boolean(
        "confirm-on-quit",
        "Ask for confirmation before quitting the application.",
    ),
    OptionDescriptor::boolean("debug", "Write debug logs to the log directory."),
    OptionDescriptor::boolean("generate", "Generate configuration."),
    OptionDescriptor::boolean("version", "Print version information."),
];

/// Look up a descriptor by name.
pub fn option(name: &str) -> Option<&'static OptionDescriptor> {
    OPTIONS.iter().find(|o| o.name == name)
}

/// Build the flag parser from [`OPTIONS`].
///
/// Clap's own `--version` is disabled: `version` is an ordinary option that
/// goes through the same layering as the others.
pub fn command(config_path: &Path) -> Command {
    let after_help = format!(
        "Config file is {}\n\n{}",
        config_path.display(),
        theme::element_help()
    );

    let mut cmd = Command::new("bluetuith")
        .about("A TUI bluetooth manager")
        .override_usage("bluetuith [<flags>]")
        .disable_version_flag(true)
        .after_help(after_help);

    for option in OPTIONS {
        let arg = Arg::new(option.name)
            .long(option.name)
            .help(option.description);

        let arg = match option.kind {
            OptionKind::Boolean => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_name("bool")
                .value_parser(value_parser!(bool)),
            OptionKind::String { value_name } => {
                arg.action(ArgAction::Set).value_name(value_name)
            }
        };

        cmd = cmd.arg(arg);
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::collections::HashSet;

    #[test]
    fn test_option_names_are_unique() {
        let names: HashSet<&str> = OPTIONS.iter().map(|o| o.name).collect();
        assert_eq!(names.len(), OPTIONS.len());
    }

    #[test]
    fn test_every_option_is_a_flag() {
        let cmd = command(Path::new("/tmp/bluetuith.conf"));
        for option in OPTIONS {
            let arg = cmd
                .get_arguments()
                .find(|a| a.get_id() == option.name)
                .unwrap_or_else(|| panic!("missing flag {}", option.name));
            assert_eq!(arg.get_long(), Some(option.name));
        }
    }

    #[test]
    fn test_parses_string_and_boolean_flags() {
        let matches = command(Path::new("/tmp/bluetuith.conf"))
            .try_get_matches_from(["bluetuith", "--adapter", "hci1", "--no-warning"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("adapter").map(String::as_str),
            Some("hci1")
        );
        assert_eq!(matches.get_one::<bool>("no-warning"), Some(&true));
        assert_eq!(matches.get_one::<bool>("version"), None);
    }

    #[test]
    fn test_boolean_flags_take_an_optional_value() {
        let matches = command(Path::new("/tmp/bluetuith.conf"))
            .try_get_matches_from([
                "bluetuith",
                "--confirm-on-quit=false",
                "--no-help-display=true",
                "--debug",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<bool>("confirm-on-quit"), Some(&false));
        assert_eq!(matches.get_one::<bool>("no-help-display"), Some(&true));
        assert_eq!(matches.get_one::<bool>("debug"), Some(&true));

        let err = command(Path::new("/tmp/bluetuith.conf"))
            .try_get_matches_from(["bluetuith", "--debug=maybe"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = command(Path::new("/tmp/bluetuith.conf"))
            .try_get_matches_from(["bluetuith", "--frobnicate"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_mentions_config_path_and_theme() {
        let help = command(Path::new("/tmp/bluetuith.conf"))
            .render_long_help()
            .to_string();
        assert!(help.contains("Config file is /tmp/bluetuith.conf"));
        assert!(help.contains("Theme elements:"));
        assert!(help.contains("--adapter-states"));
    }

    #[test]
    fn test_actions() {
        assert!(option("generate").unwrap().is_action());
        assert!(!option("adapter").unwrap().is_action());
        assert!(option("debug").unwrap().is_boolean());
        assert!(option("nope").is_none());
    }
}

//! Command-line interface for winfocus
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Bring an application's window to the foreground on Linux desktops
#[derive(Parser, Debug)]
#[command(
    name = "winfocus",
    version,
    about = "Bring an application's window to the foreground on Linux desktops"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: each focus attempt, -vv: every spawned command)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a per-call timeout.
///
/// Supports any duration format accepted by `humantime` plus bare numbers
/// (seconds). `0` disables the timeout.
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Focus a terminal or application window
    Focus {
        /// Terminal/application name (default: config, then $TERM_PROGRAM)
        name: Option<String>,

        /// Shell command to run instead of the built-in focus methods
        #[arg(long, value_name = "COMMAND")]
        override_command: Option<String>,

        /// Timeout per external call (e.g. 3, 500ms, 2s; 0 disables)
        #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
        timeout: Option<Duration>,
    },

    /// Report which focus tools and D-Bus endpoints are available
    Check {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the app id and window-title search term derived from a name
    Resolve {
        /// Terminal/application name (default: detected from the environment)
        name: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration inspection actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (file + environment) as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_focus_defaults() {
        let cli = Cli::try_parse_from(["winfocus", "focus"]).unwrap();
        match cli.command {
            Commands::Focus {
                name,
                override_command,
                timeout,
            } => {
                assert!(name.is_none());
                assert!(override_command.is_none());
                assert!(timeout.is_none());
            }
            other => panic!("Expected Focus command, got {:?}", other),
        }
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_focus_with_options() {
        let cli = Cli::try_parse_from([
            "winfocus",
            "focus",
            "kitty",
            "--override-command",
            "kitty @ focus-window",
            "--timeout",
            "500ms",
        ])
        .unwrap();

        match cli.command {
            Commands::Focus {
                name,
                override_command,
                timeout,
            } => {
                assert_eq!(name.as_deref(), Some("kitty"));
                assert_eq!(override_command.as_deref(), Some("kitty @ focus-window"));
                assert_eq!(timeout, Some(Duration::from_millis(500)));
            }
            other => panic!("Expected Focus command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_timeout_formats() {
        assert_eq!(parse_timeout("3"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_timeout("0"), Ok(Duration::ZERO));
        assert_eq!(parse_timeout("2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_timeout("1m30s"), Ok(Duration::from_secs(90)));
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_parse_verbose_double() {
        let cli = Cli::try_parse_from(["winfocus", "-vv", "focus"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "winfocus",
            "check",
            "--quiet",
            "--config",
            "/path/to/config.toml",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_parse_check_json() {
        let cli = Cli::try_parse_from(["winfocus", "check", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { json: true }));
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["winfocus", "resolve", "code"]).unwrap();
        match cli.command {
            Commands::Resolve { name } => assert_eq!(name.as_deref(), Some("code")),
            other => panic!("Expected Resolve command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_actions() {
        let cli = Cli::try_parse_from(["winfocus", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
        let cli = Cli::try_parse_from(["winfocus", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["winfocus"]).is_err());
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["winfocus", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Bash }
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

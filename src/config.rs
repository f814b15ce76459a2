use crate::defaults;
use crate::identity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub focus: FocusConfig,
}

/// Focus request configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FocusConfig {
    /// Terminal/application name; detected from the environment when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// Shell command run instead of the focus chain when non-empty.
    pub override_command: String,
    /// Bound on each external call in seconds; 0 waits indefinitely.
    pub timeout_secs: u64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            terminal: None,
            override_command: String::new(),
            timeout_secs: defaults::COMMAND_TIMEOUT_SECS,
        }
    }
}

impl FocusConfig {
    /// The override command, if one is configured.
    pub fn override_command(&self) -> Option<&str> {
        let command = self.override_command.trim();
        (!command.is_empty()).then_some(command)
    }

    /// Configured terminal name, falling back to environment detection.
    pub fn terminal_name(&self) -> String {
        match &self.terminal {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => identity::detect_terminal_name(),
        }
    }

    /// Per-call timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound) =>
            {
                Ok(Self::default())
            }
            Err(e) => Err(e.context(format!("Failed to load config from {}", path.display()))),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - WINFOCUS_TERMINAL → focus.terminal
    /// - WINFOCUS_OVERRIDE_COMMAND → focus.override_command
    /// - WINFOCUS_TIMEOUT_SECS → focus.timeout_secs (ignored unless a number)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(terminal) = std::env::var("WINFOCUS_TERMINAL")
            && !terminal.is_empty()
        {
            self.focus.terminal = Some(terminal);
        }

        if let Ok(command) = std::env::var("WINFOCUS_OVERRIDE_COMMAND")
            && !command.is_empty()
        {
            self.focus.override_command = command;
        }

        if let Ok(timeout) = std::env::var("WINFOCUS_TIMEOUT_SECS")
            && let Ok(secs) = timeout.trim().parse::<u64>()
        {
            self.focus.timeout_secs = secs;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/winfocus/config.toml on Linux, or a relative
    /// `winfocus/config.toml` when no config directory can be determined.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_default()
            .join("winfocus")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_winfocus_env() {
        remove_env("WINFOCUS_TERMINAL");
        remove_env("WINFOCUS_OVERRIDE_COMMAND");
        remove_env("WINFOCUS_TIMEOUT_SECS");
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.focus.terminal, None);
        assert_eq!(config.focus.override_command, "");
        assert_eq!(config.focus.timeout_secs, 5);
        assert_eq!(config.focus.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.focus.override_command(), None);
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            [focus]
            terminal = "kitty"
            override_command = "kitty @ focus-window"
            timeout_secs = 2
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.focus.terminal, Some("kitty".to_string()));
        assert_eq!(
            config.focus.override_command(),
            Some("kitty @ focus-window")
        );
        assert_eq!(config.focus.timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let toml_content = r#"
            [focus]
            terminal = "code"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.focus.terminal, Some("code".to_string()));
        assert_eq!(config.focus.override_command, "");
        assert_eq!(config.focus.timeout_secs, 5);
    }

    #[test]
    fn test_zero_timeout_disables_bound() {
        let focus = FocusConfig {
            timeout_secs: 0,
            ..FocusConfig::default()
        };
        assert_eq!(focus.timeout(), None);
    }

    #[test]
    fn test_configured_terminal_wins_over_detection() {
        let focus = FocusConfig {
            terminal: Some("konsole".to_string()),
            ..FocusConfig::default()
        };
        assert_eq!(focus.terminal_name(), "konsole");
    }

    #[test]
    fn test_blank_terminal_falls_back_to_detection() {
        let focus = FocusConfig {
            terminal: Some("  ".to_string()),
            ..FocusConfig::default()
        };
        assert_eq!(focus.terminal_name(), identity::detect_terminal_name());
    }

    #[test]
    fn test_override_command_is_trimmed() {
        let focus = FocusConfig {
            override_command: "  wmctrl -a code \n".to_string(),
            ..FocusConfig::default()
        };
        assert_eq!(focus.override_command(), Some("wmctrl -a code"));
    }

    #[test]
    fn test_env_override_terminal_and_command() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_winfocus_env();

        set_env("WINFOCUS_TERMINAL", "alacritty");
        set_env("WINFOCUS_OVERRIDE_COMMAND", "swaymsg '[app_id=Alacritty] focus'");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.focus.terminal, Some("alacritty".to_string()));
        assert_eq!(
            config.focus.override_command,
            "swaymsg '[app_id=Alacritty] focus'"
        );

        clear_winfocus_env();
    }

    #[test]
    fn test_env_override_timeout() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_winfocus_env();

        set_env("WINFOCUS_TIMEOUT_SECS", "12");
        assert_eq!(Config::default().with_env_overrides().focus.timeout_secs, 12);

        set_env("WINFOCUS_TIMEOUT_SECS", "soon");
        assert_eq!(Config::default().with_env_overrides().focus.timeout_secs, 5);

        clear_winfocus_env();
    }

    #[test]
    fn test_env_override_empty_string_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_winfocus_env();

        set_env("WINFOCUS_TERMINAL", "");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.focus.terminal, None);

        clear_winfocus_env();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = r#"
            [focus
            terminal = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_default_path_ends_with_app_config() {
        let path = Config::default_path();
        assert!(path.ends_with("winfocus/config.toml"));
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing_path = Path::new("/tmp/nonexistent_winfocus_config_12345.toml");
        let config = Config::load_or_default(missing_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_errors_on_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[focus\n").unwrap();

        let err = Config::load_or_default(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_serialized_default_omits_unset_terminal() {
        let rendered = toml::to_string(&Config::default()).unwrap();
        assert!(rendered.contains("[focus]"));
        assert!(!rendered.contains("terminal"));
    }
}

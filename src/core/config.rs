//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.markban/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::board::{DEFAULT_COLUMNS, LoadOptions};
use crate::core::markdown::ParsePolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MarkbanConfig {
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    pub file: Option<String>,
    pub default_columns: Option<Vec<String>>,
    pub parse_policy: Option<ParsePolicy>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BOARD_FILE: &str = ".board.md";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub board_file: PathBuf,
    pub default_columns: Vec<String>,
    pub parse_policy: ParsePolicy,
}

impl ResolvedConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            policy: self.parse_policy,
            default_columns: self.default_columns.clone(),
        }
    }
}

/// Values taken from the command line.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub board_file: Option<PathBuf>,
    pub strict: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.markban/`, where the config and log file live.
pub fn markban_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".markban"))
}

/// Returns the path to `~/.markban/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    markban_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.markban/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MarkbanConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MarkbanConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path, true),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(MarkbanConfig::default())
        }
    }
}

/// Load config from an explicit path. A missing file is only generated
/// when `generate_if_missing` is set.
pub fn load_config_from(path: &Path, generate_if_missing: bool) -> Result<MarkbanConfig, ConfigError> {
    if !path.exists() {
        if generate_if_missing {
            info!("No config file found, generating default at {}", path.display());
            generate_default_config(path);
        } else {
            warn!("Config file {} not found, using defaults", path.display());
        }
        return Ok(MarkbanConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MarkbanConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# markban configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [board]
# file = ".board.md"                 # Or set MARKBAN_FILE, or pass a path on the command line
# default_columns = ["Todo", "In Progress", "Done"]   # Used when the board file doesn't exist yet
# parse_policy = "lenient"           # "lenient" skips stray lines, "strict" rejects them (or --strict)
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MarkbanConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var("MARKBAN_FILE").ok())
}

fn resolve_with_env(
    config: &MarkbanConfig,
    cli: &CliOverrides,
    env_file: Option<String>,
) -> ResolvedConfig {
    // Board file: CLI → env → config → default
    let board_file = cli
        .board_file
        .clone()
        .or_else(|| env_file.as_deref().map(expand_home))
        .or_else(|| config.board.file.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BOARD_FILE));

    // --strict can only tighten the policy
    let parse_policy = if cli.strict {
        ParsePolicy::Strict
    } else {
        config.board.parse_policy.unwrap_or_default()
    };

    let default_columns = config
        .board
        .default_columns
        .clone()
        .filter(|cols| !cols.is_empty())
        .unwrap_or_else(|| DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect());

    ResolvedConfig {
        board_file,
        default_columns,
        parse_policy,
    }
}

/// Expands a leading `~` to the home directory. The shell does this for
/// CLI arguments but not for config or env values.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => {
            warn!("Could not determine home directory, using {} as written", path);
            PathBuf::from(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = MarkbanConfig::default();
        assert!(config.board.file.is_none());
        assert!(config.board.default_columns.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&MarkbanConfig::default(), &CliOverrides::default(), None);
        assert_eq!(resolved.board_file, PathBuf::from(DEFAULT_BOARD_FILE));
        assert_eq!(resolved.default_columns, vec!["Todo", "In Progress", "Done"]);
        assert_eq!(resolved.parse_policy, ParsePolicy::Lenient);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MarkbanConfig {
            board: BoardConfig {
                file: Some("work.md".to_string()),
                default_columns: Some(vec!["Backlog".to_string(), "Done".to_string()]),
                parse_policy: Some(ParsePolicy::Strict),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.board_file, PathBuf::from("work.md"));
        assert_eq!(resolved.default_columns, vec!["Backlog", "Done"]);
        assert_eq!(resolved.parse_policy, ParsePolicy::Strict);
    }

    #[test]
    fn test_resolve_env_beats_config_and_cli_beats_env() {
        let config = MarkbanConfig {
            board: BoardConfig {
                file: Some("config.md".to_string()),
                ..Default::default()
            },
        };
        let from_env = resolve_with_env(&config, &CliOverrides::default(), Some("env.md".into()));
        assert_eq!(from_env.board_file, PathBuf::from("env.md"));

        let cli = CliOverrides {
            board_file: Some(PathBuf::from("cli.md")),
            strict: true,
        };
        let from_cli = resolve_with_env(&config, &cli, Some("env.md".into()));
        assert_eq!(from_cli.board_file, PathBuf::from("cli.md"));
        assert_eq!(from_cli.parse_policy, ParsePolicy::Strict);
    }

    #[test]
    fn test_empty_default_columns_fall_back() {
        let config = MarkbanConfig {
            board: BoardConfig {
                default_columns: Some(Vec::new()),
                ..Default::default()
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        assert_eq!(resolved.default_columns.len(), 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[board]
file = "~/notes/board.md"
default_columns = ["Ideas", "Doing", "Done"]
parse_policy = "strict"
"#;
        let config: MarkbanConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.file.as_deref(), Some("~/notes/board.md"));
        assert_eq!(config.board.default_columns.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.board.parse_policy, Some(ParsePolicy::Strict));
    }

    #[test]
    fn test_home_relative_board_file_is_expanded() {
        let config: MarkbanConfig =
            toml::from_str("[board]\nfile = \"~/notes/board.md\"\n").unwrap();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), None);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved.board_file, home.join("notes/board.md"));
        }

        let from_env = resolve_with_env(
            &MarkbanConfig::default(),
            &CliOverrides::default(),
            Some("~/b.md".to_string()),
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(from_env.board_file, home.join("b.md"));
        }
    }

    #[test]
    fn test_only_leading_tilde_slash_is_expanded() {
        assert_eq!(expand_home("notes/~/b.md"), PathBuf::from("notes/~/b.md"));
        assert_eq!(expand_home("~other/b.md"), PathBuf::from("~other/b.md"));
        assert_eq!(expand_home(".board.md"), PathBuf::from(".board.md"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: MarkbanConfig = toml::from_str("").unwrap();
        assert!(config.board.parse_policy.is_none());

        let config: MarkbanConfig = toml::from_str("[board]\nfile = \"b.md\"\n").unwrap();
        assert_eq!(config.board.file.as_deref(), Some("b.md"));
        assert!(config.board.default_columns.is_none());
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result: Result<MarkbanConfig, _> = toml::from_str("[board]\nparse_policy = \"loose\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_default_config_is_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path, true).unwrap();
        assert!(config.board.file.is_none());
        assert!(path.exists());

        let reloaded = load_config_from(&path, false).unwrap();
        assert!(reloaded.board.file.is_none());
    }

    #[test]
    fn test_missing_config_not_generated_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        load_config_from(&path, false).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[board\nfile = 1").unwrap();
        assert!(matches!(
            load_config_from(&path, false),
            Err(ConfigError::Parse(_))
        ));
    }
}

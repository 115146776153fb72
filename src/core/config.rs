//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sozelio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::Provider;
use crate::core::profile::{Branch, Course};
use crate::core::session::RewardPolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SozelioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub gemini: EndpointConfig,
    #[serde(default)]
    pub openrouter: EndpointConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub learner_name: Option<String>,
    pub default_course: Option<Course>,
    pub default_branch: Option<Branch>,
    pub premium: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneratorConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RewardsConfig {
    pub xp_per_quiz_point: Option<u32>,
    pub completion_gems: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlaybackConfig {
    pub video_secs: Option<u32>,
    pub podcast_secs: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DownloadsConfig {
    pub dir: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_VIDEO_SECS: u32 = 90;
pub const DEFAULT_PODCAST_SECS: u32 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub learner_name: String,
    pub course: Course,
    pub branch: Branch,
    pub premium: bool,
    pub provider: Provider,
    pub model_name: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub rewards: RewardPolicy,
    pub video_secs: u32,
    pub podcast_secs: u32,
    pub downloads_dir: PathBuf,
}

impl ResolvedConfig {
    /// API key of the selected provider, if any.
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::OpenRouter => self.openrouter_api_key.as_deref(),
        }
    }
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub branch: Option<Branch>,
    pub premium: bool,
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

/// Returns the path to `~/.sozelio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sozelio").join("config.toml"))
}

/// Load config from `~/.sozelio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SozelioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SozelioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SozelioConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SozelioConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SozelioConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SozelioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Sözelio Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# learner_name = "Öğrenci"
# default_course = "TYT"             # "KPSS", "TYT" or "AYT"
# default_branch = "history"         # "history" or "geography"
# premium = false

# [generator]
# provider = "gemini"                # "gemini" or "openrouter"
# model = "gemini-2.5-flash"         # Or set SOZELIO_MODEL env var

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"

# [openrouter]
# api_key = "sk-or-..."              # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"

# [rewards]
# xp_per_quiz_point = 10
# completion_gems = 10

# [playback]
# video_secs = 90
# podcast_secs = 120

# [downloads]
# dir = "/home/me/Downloads"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SozelioConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &SozelioConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .or_else(|| env("SOZELIO_PROVIDER").and_then(|s| parse_provider(&s)))
        .or_else(|| config.generator.provider.as_deref().and_then(parse_provider))
        .unwrap_or_default();

    // Model: env → config → provider default
    let model_name = env("SOZELIO_MODEL")
        .or_else(|| config.generator.model.clone())
        .unwrap_or_else(|| match provider {
            Provider::Gemini => DEFAULT_GEMINI_MODEL.to_string(),
            Provider::OpenRouter => DEFAULT_OPENROUTER_MODEL.to_string(),
        });

    let gemini_api_key = env("GEMINI_API_KEY").or_else(|| config.gemini.api_key.clone());
    let gemini_base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    let openrouter_api_key =
        env("OPENROUTER_API_KEY").or_else(|| config.openrouter.api_key.clone());
    let openrouter_base_url = env("OPENROUTER_BASE_URL")
        .or_else(|| config.openrouter.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string());

    let defaults = RewardPolicy::default();
    let rewards = RewardPolicy {
        xp_per_quiz_point: config
            .rewards
            .xp_per_quiz_point
            .unwrap_or(defaults.xp_per_quiz_point),
        completion_gems: config
            .rewards
            .completion_gems
            .unwrap_or(defaults.completion_gems),
    };

    ResolvedConfig {
        learner_name: config
            .general
            .learner_name
            .clone()
            .unwrap_or_else(|| "Öğrenci".to_string()),
        course: config.general.default_course.unwrap_or_default(),
        branch: cli
            .branch
            .or(config.general.default_branch)
            .unwrap_or_default(),
        premium: cli.premium || config.general.premium.unwrap_or(false),
        provider,
        model_name,
        gemini_api_key,
        gemini_base_url,
        openrouter_api_key,
        openrouter_base_url,
        rewards,
        video_secs: config
            .playback
            .video_secs
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_VIDEO_SECS),
        podcast_secs: config
            .playback
            .podcast_secs
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_PODCAST_SECS),
        downloads_dir: config
            .downloads
            .dir
            .clone()
            .unwrap_or_else(default_downloads_dir),
    }
}

fn parse_provider(name: &str) -> Option<Provider> {
    match Provider::from_str(name, true) {
        Ok(p) => Some(p),
        Err(_) => {
            warn!("Unknown provider {:?}, ignoring", name);
            None
        }
    }
}

/// Platform download directory, else `~/.sozelio/downloads`, else the
/// working directory.
fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".sozelio").join("downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&SozelioConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.provider, Provider::Gemini);
        assert_eq!(resolved.model_name, DEFAULT_GEMINI_MODEL);
        assert_eq!(resolved.learner_name, "Öğrenci");
        assert_eq!(resolved.course, Course::Tyt);
        assert_eq!(resolved.branch, Branch::History);
        assert!(!resolved.premium);
        assert_eq!(resolved.rewards, RewardPolicy::default());
        assert_eq!(resolved.video_secs, DEFAULT_VIDEO_SECS);
        assert_eq!(resolved.podcast_secs, DEFAULT_PODCAST_SECS);
        assert_eq!(resolved.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(resolved.api_key().is_none());
    }

    #[test]
    fn test_env_wins_over_config_and_cli_wins_over_env() {
        let config: SozelioConfig = toml::from_str(
            r#"
[generator]
provider = "gemini"
model = "file-model"

[openrouter]
api_key = "sk-file"
"#,
        )
        .unwrap();
        let env = |key: &str| match key {
            "SOZELIO_PROVIDER" => Some("openrouter".to_string()),
            "SOZELIO_MODEL" => Some("env-model".to_string()),
            "OPENROUTER_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.provider, Provider::OpenRouter);
        assert_eq!(resolved.model_name, "env-model");
        assert_eq!(resolved.api_key(), Some("sk-env"));

        let cli = CliOverrides {
            provider: Some(Provider::Gemini),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.provider, Provider::Gemini);
    }

    #[test]
    fn test_provider_default_model_follows_provider() {
        let cli = CliOverrides {
            provider: Some(Provider::OpenRouter),
            ..Default::default()
        };
        let resolved = resolve_with_env(&SozelioConfig::default(), &cli, no_env);
        assert_eq!(resolved.model_name, DEFAULT_OPENROUTER_MODEL);
        assert_eq!(resolved.openrouter_base_url, DEFAULT_OPENROUTER_BASE_URL);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
learner_name = "Zeynep"
default_course = "KPSS"
default_branch = "geography"
premium = true

[gemini]
api_key = "AIza-test"
base_url = "http://localhost:9999"

[rewards]
xp_per_quiz_point = 5
completion_gems = 2

[playback]
video_secs = 30

[downloads]
dir = "/tmp/sozelio"
"#;
        let config: SozelioConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.learner_name, "Zeynep");
        assert_eq!(resolved.course, Course::Kpss);
        assert_eq!(resolved.branch, Branch::Geography);
        assert!(resolved.premium);
        assert_eq!(resolved.api_key(), Some("AIza-test"));
        assert_eq!(resolved.gemini_base_url, "http://localhost:9999");
        assert_eq!(resolved.rewards.xp_per_quiz_point, 5);
        assert_eq!(resolved.rewards.completion_gems, 2);
        assert_eq!(resolved.video_secs, 30);
        assert_eq!(resolved.podcast_secs, DEFAULT_PODCAST_SECS);
        assert_eq!(resolved.downloads_dir, PathBuf::from("/tmp/sozelio"));
    }

    #[test]
    fn test_cli_branch_and_premium_override_file() {
        let config: SozelioConfig = toml::from_str(
            r#"
[general]
default_branch = "geography"
premium = false
"#,
        )
        .unwrap();
        let cli = CliOverrides {
            branch: Some(Branch::History),
            premium: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, no_env);
        assert_eq!(resolved.branch, Branch::History);
        assert!(resolved.premium);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_default() {
        let config: SozelioConfig = toml::from_str(
            r#"
[generator]
provider = "carrier-pigeon"
"#,
        )
        .unwrap();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.provider, Provider::Gemini);
    }

    #[test]
    fn test_default_template_is_valid_toml() {
        let config: SozelioConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(config.general.learner_name.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("sozelio-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nlearner_name = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}

use std::path::PathBuf;

use serde::Deserialize;
use taal_core::yaml::{self, ConfigSource, YamlLoaderError};
use taal_core::{LanguageCode, LocalizerOptions};
use taal_logger::LoggerSettings;
use tracing::warn;

/// Environment variable naming a YAML file that replaces the embedded config.
pub const CONFIG_PATH_VAR: &str = "TAAL_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/default.yaml");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub logger: LoggerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Language selected at startup, `en` when unset or blank.
    pub default_language: Option<String>,
    pub fallback_language: Option<String>,
    pub escape_interpolation: bool,
    /// Honor `Accept-Language` when a request carries no `?lng=`.
    pub negotiate_accept_language: bool,
    /// Locale directories loaded at startup and merged after the built-in tables.
    pub overrides: Vec<LocaleOverride>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleOverride {
    pub namespace: String,
    pub dir: PathBuf,
}

impl Config {
    /// The configuration plus where it came from, for logging once logging is up.
    pub fn load() -> Result<(Self, ConfigSource), YamlLoaderError> {
        yaml::load_with_override(CONFIG_PATH_VAR, DEFAULT_CONFIG)
    }
}

impl I18nConfig {
    pub fn options(&self) -> LocalizerOptions {
        LocalizerOptions {
            default_language: parse_language("default_language", self.default_language.as_deref())
                .unwrap_or_default(),
            fallback_language: parse_language(
                "fallback_language",
                self.fallback_language.as_deref(),
            ),
            escape_interpolation: self.escape_interpolation,
        }
    }
}

fn parse_language(field: &str, raw: Option<&str>) -> Option<LanguageCode> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    LanguageCode::parse(raw)
        .inspect_err(|e| warn!("Ignoring i18n.{}: {}", field, e))
        .ok()
}

//! YAML configuration with `${VAR}` / `${VAR:default}` environment substitution.
//!
//! An environment variable that is set but empty counts as unset, so
//! `${APP_LANGUAGE:en}` yields `en` for both a missing and a blank variable.

use dotenvy::dotenv;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

fn var_regex() -> &'static Regex {
    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z0-9_]+)(?::([^\}]*))?\}").expect("Invalid regex pattern")
    })
}

fn replace_vars(yaml_content: &str) -> String {
    // A missing .env file is normal outside development.
    let _ = dotenv();

    var_regex()
        .replace_all(yaml_content, |caps: &regex::Captures| {
            let default = caps.get(2).map_or("", |m| m.as_str());
            env::var(&caps[1])
                .ok()
                .filter(|val| !val.is_empty())
                .unwrap_or_else(|| default.to_string())
        })
        .into_owned()
}

pub fn load_from_str<T: DeserializeOwned>(yaml_content: &str) -> Result<T, YamlLoaderError> {
    Ok(serde_yaml::from_str(&replace_vars(yaml_content))?)
}

pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, YamlLoaderError> {
    let content = fs::read_to_string(path)?;
    load_from_str(&content)
}

/// Where [`load_with_override`] read its configuration from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Embedded => f.write_str("embedded defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load from the file named by `path_var` if it is set, otherwise from `embedded`.
/// Nothing is logged here; the caller reports the returned source.
pub fn load_with_override<T: DeserializeOwned>(
    path_var: &str,
    embedded: &str,
) -> Result<(T, ConfigSource), YamlLoaderError> {
    let _ = dotenv();
    match env::var(path_var).ok().filter(|p| !p.is_empty()) {
        Some(path) => {
            let path = PathBuf::from(path);
            let value = load_from_file(&path)?;
            Ok((value, ConfigSource::File(path)))
        }
        None => Ok((load_from_str(embedded)?, ConfigSource::Embedded)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_replace_vars_uses_env() {
        // SAFETY: the variable name is unique to this test, no other thread reads it.
        unsafe {
            env::set_var("TAAL_TEST_VAR_SET", "nl");
        }
        assert_eq!(replace_vars("lang: ${TAAL_TEST_VAR_SET:en}"), "lang: nl");
    }

    #[test]
    fn test_replace_vars_default() {
        assert_eq!(replace_vars("lang: ${TAAL_TEST_VAR_MISSING:en}"), "lang: en");
        assert_eq!(replace_vars("lang: ${TAAL_TEST_VAR_MISSING}"), "lang: ");
    }

    #[test]
    fn test_empty_var_counts_as_unset() {
        // SAFETY: the variable name is unique to this test, no other thread reads it.
        unsafe {
            env::set_var("TAAL_TEST_VAR_EMPTY", "");
        }
        assert_eq!(replace_vars("lang: ${TAAL_TEST_VAR_EMPTY:en}"), "lang: en");
    }

    #[test]
    fn test_load_from_str() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Server {
            addr: String,
            fallback: Option<String>,
        }

        // SAFETY: the variable name is unique to this test, no other thread reads it.
        unsafe {
            env::set_var("TAAL_TEST_ADDR", "0.0.0.0:8080");
        }
        let yaml = r#"
        addr: ${TAAL_TEST_ADDR:127.0.0.1:3000}
        fallback: ${TAAL_TEST_FALLBACK_MISSING:}
        "#;

        let server: Server = load_from_str(yaml).unwrap();
        assert_eq!(
            server,
            Server {
                addr: "0.0.0.0:8080".into(),
                fallback: None,
            }
        );
    }

    #[test]
    fn test_load_with_override_prefers_embedded_without_var() {
        let (value, source): (u16, _) =
            load_with_override("TAAL_TEST_CONFIG_MISSING", "3000").unwrap();
        assert_eq!(value, 3000);
        assert_eq!(source, ConfigSource::Embedded);
    }

    #[test]
    fn test_load_with_override_reports_the_file() {
        let path = env::temp_dir().join(format!("taal_yaml_override_{}.yaml", std::process::id()));
        fs::write(&path, "8080").unwrap();
        // SAFETY: the variable name is unique to this test, no other thread reads it.
        unsafe {
            env::set_var("TAAL_TEST_CONFIG_FILE", &path);
        }

        let (value, source): (u16, _) = load_with_override("TAAL_TEST_CONFIG_FILE", "3000").unwrap();
        assert_eq!(value, 8080);
        assert_eq!(source, ConfigSource::File(path.clone()));
        assert_eq!(source.to_string(), path.display().to_string());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result: Result<u16, _> = load_from_file("/this/path/should/not/exist.yaml");
        assert!(matches!(result, Err(YamlLoaderError::Io(_))));
    }
}

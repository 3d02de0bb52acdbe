use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or switching localization state.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl I18nError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        I18nError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

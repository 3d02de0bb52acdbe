//! Runtime loading of per-language locale files.
//!
//! A locale directory holds one flat file per language, named after the
//! language code: `en.json`, `nl.toml`. Every value must be a string.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::I18nError;
use crate::i18n::{LanguageCode, Messages, TranslationTable};

fn parse_messages(path: &Path, content: &str) -> Result<Option<Messages>, I18nError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(content)
            .map(Some)
            .map_err(|e| I18nError::parse(path, e)),
        Some("toml") => toml::from_str(content)
            .map(Some)
            .map_err(|e| I18nError::parse(path, e)),
        _ => Ok(None),
    }
}

/// Load one locale file. Files that are not `.json` or `.toml` yield `None`.
pub fn load_locale_file(path: &Path) -> Result<Option<(LanguageCode, Messages)>, I18nError> {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return Ok(None);
    };
    if !matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("json" | "toml")
    ) {
        debug!("Skipping non-locale file {}", path.display());
        return Ok(None);
    }

    let language = LanguageCode::parse(stem).map_err(|e| I18nError::parse(path, e))?;
    let content = fs::read_to_string(path).map_err(|source| I18nError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_messages(path, &content)?.map(|messages| (language, messages)))
}

/// Load every locale file in `dir` into a table under `namespace`.
pub fn load_dir(dir: impl AsRef<Path>, namespace: &str) -> Result<TranslationTable, I18nError> {
    let dir = dir.as_ref();
    let io_err = |source| I18nError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    paths.sort();

    let mut table = TranslationTable::new();
    for path in paths.iter().filter(|p| p.is_file()) {
        if let Some((language, messages)) = load_locale_file(path)? {
            info!(
                "Loaded {} {} strings for {} from {}",
                messages.len(),
                namespace,
                language,
                path.display()
            );
            table = table.with_messages(language, namespace, messages);
        }
    }

    Ok(table)
}

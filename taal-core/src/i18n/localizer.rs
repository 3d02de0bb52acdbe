//! The localizer: aggregated resources plus the current language.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key absent in current and fallback language | `lookup` returns `None`, `t` returns the key |
//! | Unknown default language | Configured language has no resources | Warning at startup, lookups fall through |
//! | Unknown language on change | Code not in the resource set | `I18nError::UnsupportedLanguage`, current language kept |
//! | Malformed language on change | Code fails to parse | `I18nError::InvalidLanguage`, current language kept |

use std::borrow::Cow;

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::error::I18nError;
use crate::i18n::interpolate::interpolate;
use crate::i18n::{LanguageCode, ResourceSet};

#[derive(Debug, Clone)]
pub struct LocalizerOptions {
    /// Language selected at startup.
    pub default_language: LanguageCode,
    /// Consulted when the current language lacks a key.
    pub fallback_language: Option<LanguageCode>,
    /// HTML-escape interpolated values.
    pub escape_interpolation: bool,
}

impl Default for LocalizerOptions {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::default(),
            fallback_language: None,
            escape_interpolation: true,
        }
    }
}

/// Shared localization context.
///
/// Built once at startup and passed around behind an `Arc`. Resources never
/// change; the current language is held in a watch channel so readers see a
/// consistent value without locking and subscribers learn about switches.
pub struct Localizer {
    resources: ResourceSet,
    fallback_language: Option<LanguageCode>,
    escape_interpolation: bool,
    current: watch::Sender<LanguageCode>,
}

impl Localizer {
    pub fn new(resources: ResourceSet, options: LocalizerOptions) -> Self {
        let languages: Vec<&str> = resources.languages().collect();
        info!(
            "Localizer loaded {} strings for languages {:?}, default {}",
            resources.len(),
            languages,
            options.default_language
        );

        if !resources.contains_language(options.default_language.as_str()) {
            warn!(
                "Default language {} has no translations, lookups will fall back",
                options.default_language
            );
        }
        if let Some(fallback) = &options.fallback_language
            && !resources.contains_language(fallback.as_str())
        {
            warn!("Fallback language {} has no translations", fallback);
        }

        let (current, _) = watch::channel(options.default_language);
        Self {
            resources,
            fallback_language: options.fallback_language,
            escape_interpolation: options.escape_interpolation,
            current,
        }
    }

    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    pub fn language(&self) -> LanguageCode {
        self.current.borrow().clone()
    }

    pub fn supported_languages(&self) -> Vec<&str> {
        self.resources.languages().collect()
    }

    /// Whether resources exist for `code`, in any case spelling.
    pub fn is_supported(&self, code: &str) -> bool {
        LanguageCode::parse(code).is_ok_and(|code| self.resources.contains_language(code.as_str()))
    }

    /// Switch the current language.
    ///
    /// Returns `Ok(false)` without notifying subscribers when `code` is
    /// already current.
    pub fn change_language(&self, code: &str) -> Result<bool, I18nError> {
        let code = LanguageCode::parse(code)?;
        if !self.is_supported(code.as_str()) {
            return Err(I18nError::UnsupportedLanguage(code.to_string()));
        }

        let mut previous = None;
        let changed = self.current.send_if_modified(|current| {
            if *current == code {
                return false;
            }
            previous = Some(std::mem::replace(current, code.clone()));
            true
        });

        match previous {
            Some(previous) => info!("Language changed from {} to {}", previous, code),
            None => debug!("Language {} already selected", code),
        }
        Ok(changed)
    }

    /// Receive the current language and every later switch.
    pub fn subscribe(&self) -> watch::Receiver<LanguageCode> {
        self.current.subscribe()
    }

    /// Look a key up in the current language, then the fallback language.
    pub fn lookup(&self, namespace: &str, key: &str) -> Option<&str> {
        let language = self.language();
        self.lookup_in(language.as_str(), namespace, key)
    }

    pub fn lookup_in(&self, language: &str, namespace: &str, key: &str) -> Option<&str> {
        self.resources.get(language, namespace, key).or_else(|| {
            self.fallback_language
                .as_ref()
                .filter(|fallback| fallback.as_str() != language)
                .and_then(|fallback| self.resources.get(fallback.as_str(), namespace, key))
        })
    }

    /// Translate in the current language, falling back to the key itself.
    pub fn t(&self, namespace: &str, key: &str) -> String {
        self.translator(&self.language(), namespace).t(key).into_owned()
    }

    pub fn t_with(&self, namespace: &str, key: &str, args: &[(&str, &str)]) -> String {
        self.translator(&self.language(), namespace).t_with(key, args)
    }

    /// A view bound to one language and namespace, for a single render.
    pub fn translator<'a>(&'a self, language: &LanguageCode, namespace: &'a str) -> Translator<'a> {
        Translator {
            localizer: self,
            language: language.clone(),
            namespace,
        }
    }
}

/// Namespace-scoped lookups for one language.
pub struct Translator<'a> {
    localizer: &'a Localizer,
    language: LanguageCode,
    namespace: &'a str,
}

impl<'a> Translator<'a> {
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn namespace(&self) -> &str {
        self.namespace
    }

    pub fn lookup(&self, key: &str) -> Option<&'a str> {
        self.localizer
            .lookup_in(self.language.as_str(), self.namespace, key)
    }

    pub fn t<'k>(&self, key: &'k str) -> Cow<'k, str>
    where
        'a: 'k,
    {
        match self.lookup(key) {
            Some(text) => Cow::Borrowed(text),
            None => {
                debug!(
                    "Missing translation {}/{}/{:?}",
                    self.language, self.namespace, key
                );
                Cow::Borrowed(key)
            }
        }
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), args, self.localizer.escape_interpolation)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// A normalized language tag such as `en`, `nl` or `pt-BR`.
///
/// Subtags take their canonical case: the primary subtag lowercase, a
/// two-letter region uppercase (`BR`), a four-letter script titlecase
/// (`Hant`) and anything else lowercase. `_` is accepted as a separator and
/// rewritten to `-`, so `PT_br` and `pt-BR` are the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(raw: &str) -> Result<Self, I18nError> {
        let invalid = || I18nError::InvalidLanguage(raw.to_string());

        let mut subtags = raw.trim().split(['-', '_']);
        let primary = subtags.next().ok_or_else(invalid)?;
        if !(2..=8).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let mut code = primary.to_ascii_lowercase();
        for sub in subtags {
            if !(2..=8).contains(&sub.len()) || !sub.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid());
            }
            code.push('-');
            push_canonical(&mut code, sub);
        }

        Ok(LanguageCode(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag: `pt` for `pt-BR`.
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

fn push_canonical(code: &mut String, sub: &str) {
    let alphabetic = sub.chars().all(|c| c.is_ascii_alphabetic());
    match sub.len() {
        2 if alphabetic => code.push_str(&sub.to_ascii_uppercase()),
        4 if alphabetic => {
            let (first, rest) = sub.split_at(1);
            code.push_str(&first.to_ascii_uppercase());
            code.push_str(&rest.to_ascii_lowercase());
        }
        _ => code.push_str(&sub.to_ascii_lowercase()),
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        LanguageCode("en".to_string())
    }
}

impl FromStr for LanguageCode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LanguageCode::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

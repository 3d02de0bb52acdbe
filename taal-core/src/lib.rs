pub mod error;
pub mod i18n;
pub mod yaml;

pub use error::I18nError;
pub use i18n::{
    Collision, LanguageCode, Localizer, LocalizerOptions, ResourceSet, TranslationTable,
    Translator,
};

//! Translation resources and the localizer built on top of them.
//!
//! Feature modules each contribute a [`TranslationTable`] (language →
//! namespace → key → text). The tables are folded into one immutable
//! [`ResourceSet`] at startup and handed to a [`Localizer`], which owns the
//! current language and answers lookups.

pub mod interpolate;
pub mod language;
pub mod loader;
pub mod localizer;
pub mod resource;

pub use language::LanguageCode;
pub use localizer::{Localizer, LocalizerOptions, Translator};
pub use resource::{Collision, Messages, ResourceSet, TranslationTable};

use taal_axum::Page;
use taal_core::TranslationTable;

use crate::modules::greeting::{self, Greeting};
use crate::modules::language_selector::{self, LanguageSelector};

pub const TITLE: &str = "taal";

/// The page: heading first, then the language dropdown.
pub fn page() -> Page {
    Page::new(TITLE)
        .with(Greeting)
        .with(LanguageSelector::default())
}

/// Every built-in table, in merge order.
pub fn translations() -> Vec<TranslationTable> {
    vec![
        language_selector::translations(),
        greeting::translations(),
        taal_axum::resp::translations(),
    ]
}

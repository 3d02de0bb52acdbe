use taal_axum_macro::translations;
use taal_core::TranslationTable;

pub mod code;
pub mod err;
pub mod r;

/// Namespace holding the response messages, keyed by numeric code.
pub const NAMESPACE: &str = "Response";

/// Built-in response messages, to be aggregated with the application's tables.
pub fn translations() -> TranslationTable {
    translations!("Response", "locales")
}

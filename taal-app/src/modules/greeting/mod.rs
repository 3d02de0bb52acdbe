use taal_axum::page::{Component, escape_html};
use taal_axum_macro::translations;
use taal_core::{TranslationTable, Translator};

pub const NAMESPACE: &str = "Greeting";
pub const HEADER_KEY: &str = "[header] greeting";

pub fn translations() -> TranslationTable {
    translations!("Greeting", "src/modules/greeting/locales")
}

/// The page heading.
pub struct Greeting;

impl Component for Greeting {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn render(&self, t: &Translator<'_>, out: &mut String) {
        out.push_str("<h1 class=\"greeting\">");
        out.push_str(&escape_html(&t.t(HEADER_KEY)));
        out.push_str("</h1>");
    }
}

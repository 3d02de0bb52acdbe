use taal_axum::page::{Component, escape_html};
use taal_axum_macro::translations;
use taal_core::{TranslationTable, Translator};

pub const NAMESPACE: &str = "LanguageSelector";

/// Offered languages and the key of each option's label.
pub const OPTIONS: [(&str, &str); 2] = [("en", "[option] english"), ("nl", "[option] dutch")];

pub fn translations() -> TranslationTable {
    translations!("LanguageSelector", "src/modules/language_selector/locales")
}

/// A dropdown that posts the chosen language to `action`.
///
/// Choosing an option submits the form right away; the button is only shown
/// when scripts are disabled.
pub struct LanguageSelector {
    action: &'static str,
}

impl LanguageSelector {
    pub fn new(action: &'static str) -> Self {
        Self { action }
    }
}

impl Default for LanguageSelector {
    fn default() -> Self {
        Self::new("/language")
    }
}

impl Component for LanguageSelector {
    fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    fn render(&self, t: &Translator<'_>, out: &mut String) {
        out.push_str(&format!(
            "<form method=\"post\" action=\"{}\">",
            escape_html(self.action)
        ));
        out.push_str(&format!(
            "<select name=\"lng\" class=\"LanguageSelector\" aria-label=\"{}\" onchange=\"this.form.submit()\">",
            escape_html(&t.t("[label] language"))
        ));
        for (code, label_key) in OPTIONS {
            let selected = if t.language() == code { " selected" } else { "" };
            out.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                code,
                selected,
                escape_html(&t.t(label_key))
            ));
        }
        out.push_str("</select>");
        out.push_str(&format!(
            "<noscript><button type=\"submit\">{}</button></noscript>",
            escape_html(&t.t("[button] change"))
        ));
        out.push_str("</form>");
    }
}

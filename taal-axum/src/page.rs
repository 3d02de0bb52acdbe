//! Server-side page rendering.
//!
//! A [`Page`] is an ordered list of [`Component`]s. Each component renders
//! against a [`Translator`] bound to its own namespace and the request
//! language. The localizer does not escape translated text, so components
//! pass every string through [`escape_html`] before writing it.

use std::sync::Arc;

use taal_core::{LanguageCode, Localizer, Translator};

pub use taal_core::i18n::interpolate::escape_html;

pub trait Component: Send + Sync {
    /// Namespace the component's keys live in.
    fn namespace(&self) -> &'static str;

    fn render(&self, t: &Translator<'_>, out: &mut String);
}

#[derive(Clone)]
pub struct Page {
    title: String,
    components: Vec<Arc<dyn Component>>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            components: Vec::new(),
        }
    }

    pub fn with(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    /// Render only the components, wrapped in `<div class="App">`.
    pub fn render_body(&self, localizer: &Localizer, language: &LanguageCode, out: &mut String) {
        out.push_str("<div class=\"App\">\n");
        for component in &self.components {
            let t = localizer.translator(language, component.namespace());
            component.render(&t, out);
            out.push('\n');
        }
        out.push_str("</div>\n");
    }

    /// Render a complete HTML document in `language`.
    pub fn render(&self, localizer: &Localizer, language: &LanguageCode) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n", escape_html(language.as_str())));
        out.push_str("<head>\n<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        out.push_str("</head>\n<body>\n");
        self.render_body(localizer, language, &mut out);
        out.push_str("</body>\n</html>\n");
        out
    }
}

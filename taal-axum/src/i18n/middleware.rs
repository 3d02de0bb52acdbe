//! Per-request language resolution.
//!
//! The language of a request is, in order: a supported `?lng=` query value,
//! the best supported `Accept-Language` entry when negotiation is enabled,
//! and otherwise the localizer's current language. The result is scoped for
//! the request as a [`RequestLocale`], reachable both as an extractor and
//! through [`RequestLocale::current`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use taal_core::{LanguageCode, Localizer};
use tokio::task_local;

use crate::resp::err::E;

task_local! {
    pub(crate) static REQUEST_LOCALE: RequestLocale;
}

#[derive(Clone)]
pub struct LocaleState {
    pub localizer: Arc<Localizer>,
    pub negotiate: bool,
}

/// The localizer together with the language chosen for one request.
#[derive(Clone)]
pub struct RequestLocale {
    localizer: Arc<Localizer>,
    language: LanguageCode,
}

impl RequestLocale {
    pub fn new(localizer: Arc<Localizer>, language: LanguageCode) -> Self {
        Self {
            localizer,
            language,
        }
    }

    /// The locale of the request being handled on this task, if any.
    pub fn current() -> Option<RequestLocale> {
        REQUEST_LOCALE.try_with(|locale| locale.clone()).ok()
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn localizer(&self) -> &Arc<Localizer> {
        &self.localizer
    }

    pub fn lookup(&self, namespace: &str, key: &str) -> Option<&str> {
        self.localizer
            .lookup_in(self.language.as_str(), namespace, key)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestLocale {
    type Rejection = E;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestLocale>()
            .cloned()
            .ok_or_else(|| E::Sys(anyhow::anyhow!("locale middleware is not installed")))
    }
}

pub async fn handle_i18n(State(state): State<LocaleState>, mut req: Request, next: Next) -> Response {
    let language = resolve_language(&state, req.uri().query(), req.headers());
    let locale = RequestLocale::new(state.localizer, language);
    req.extensions_mut().insert(locale.clone());

    REQUEST_LOCALE.scope(locale, next.run(req)).await
}

fn resolve_language(state: &LocaleState, query: Option<&str>, headers: &HeaderMap) -> LanguageCode {
    let supported = |code: &LanguageCode| state.localizer.is_supported(code.as_str());

    if let Some(code) = query_language(query).filter(supported) {
        return code;
    }

    if state.negotiate
        && let Some(code) = negotiate(headers, &state.localizer)
    {
        return code;
    }

    state.localizer.language()
}

fn query_language(query: Option<&str>) -> Option<LanguageCode> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("lng="))
        .and_then(|raw| LanguageCode::parse(raw).ok())
}

/// Pick the highest-weighted supported entry of `Accept-Language`.
///
/// Entries weighted `q=0` are not acceptable and are skipped.
///
/// `"nl-BE,nl;q=0.9,en;q=0.8"` tries `nl-BE`, then its primary `nl`, then `en`.
fn negotiate(headers: &HeaderMap, localizer: &Localizer) -> Option<LanguageCode> {
    let header = headers
        .get("accept-language")
        .and_then(|v| v.to_str().ok())?;

    let mut langs: Vec<(f32, LanguageCode)> = header
        .split(',')
        .filter_map(|part| {
            let mut sections = part.split(';');
            let lang = LanguageCode::parse(sections.next()?.trim()).ok()?;
            let q_value = sections
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(1.0);
            (q_value > 0.0).then_some((q_value, lang))
        })
        .collect();

    // Stable sort keeps header order among equal weights.
    langs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    langs.into_iter().find_map(|(_, lang)| {
        if localizer.is_supported(lang.as_str()) {
            Some(lang)
        } else {
            LanguageCode::parse(lang.primary())
                .ok()
                .filter(|primary| localizer.is_supported(primary.as_str()))
        }
    })
}

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::{Html, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use taal_axum::{Code, E, Page, R, RequestLocale, r};
use taal_core::{Localizer, ResourceSet};
use tracing::info;
use validator::Validate;

#[derive(Clone)]
pub struct AppState {
    pub localizer: Arc<Localizer>,
    pub page: Arc<Page>,
}

impl AppState {
    pub fn new(localizer: Arc<Localizer>, page: Page) -> Self {
        Self {
            localizer,
            page: Arc::new(page),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LanguageChange {
    #[validate(required, length(min = 2, max = 35))]
    #[serde(alias = "language")]
    pub lng: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct LanguageView {
    pub current: String,
    pub supported: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct ChangeView {
    pub language: String,
    pub changed: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/language", post(change_language_form))
        .route("/api/language", get(current_language).put(change_language_json))
        .route("/api/resources", get(resources))
        .route("/api/t/{namespace}/{key}", get(translate))
        .with_state(state)
}

async fn index(State(state): State<AppState>, locale: RequestLocale) -> Html<String> {
    Html(state.page.render(&state.localizer, locale.language()))
}

/// Target of the selector form. Re-renders the page in the new language.
async fn change_language_form(
    State(state): State<AppState>,
    Form(form): Form<LanguageChange>,
) -> Result<Redirect, E> {
    form.validate()?;
    let language = form.lng.unwrap_or_default();
    state.localizer.change_language(&language)?;
    Ok(Redirect::to("/"))
}

async fn current_language(State(state): State<AppState>) -> R<LanguageView> {
    R::ok(LanguageView {
        current: state.localizer.language().to_string(),
        supported: state
            .localizer
            .supported_languages()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    })
}

async fn change_language_json(
    State(state): State<AppState>,
    Json(body): Json<LanguageChange>,
) -> R<ChangeView> {
    r!(body.validate());
    let language = body.lng.unwrap_or_default();
    let changed = r!(state.localizer.change_language(&language));

    R::ok(ChangeView {
        language: state.localizer.language().to_string(),
        changed,
    })
}

async fn resources(State(state): State<AppState>) -> R<ResourceSet> {
    R::ok(state.localizer.resources().clone())
}

async fn translate(
    locale: RequestLocale,
    Path((namespace, key)): Path<(String, String)>,
) -> R<String> {
    R::of(lookup(&locale, &namespace, &key))
}

/// An unknown namespace is a 404; a known namespace without the key is 1002.
fn lookup(locale: &RequestLocale, namespace: &str, key: &str) -> Result<String, E> {
    if !locale.localizer().resources().contains_namespace(namespace) {
        return Err(E::Code(Code::NotFound.as_i32()));
    }
    locale
        .lookup(namespace, key)
        .map(str::to_owned)
        .ok_or_else(|| E::msg(Code::MissingTranslation, "key", format!("{namespace}/{key}")))
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        "{} {} {} {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

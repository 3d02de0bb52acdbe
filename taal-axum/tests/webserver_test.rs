use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use taal_axum::{Code, E, R, RequestLocale, WebServer, r, resp};
use taal_core::{LanguageCode, Localizer, LocalizerOptions, ResourceSet};
use tower::ServiceExt;
use validator::Validate;

#[derive(serde::Serialize)]
struct Ping {
    pong: bool,
}

#[derive(serde::Serialize)]
struct Echo {
    name: String,
    age: i32,
}

#[derive(serde::Deserialize, Validate)]
struct EchoJson {
    #[validate(required, length(min = 1, max = 10))]
    name: Option<String>,
    #[validate(required)]
    age: Option<i32>,
}

async fn ping() -> R<Ping> {
    R::ok(Ping { pong: true })
}

async fn echo(Json(json): Json<EchoJson>) -> R<Option<Echo>> {
    r!(json.validate());

    R::ok(Some(Echo {
        name: json.name.unwrap_or_default(),
        age: json.age.unwrap_or_default(),
    }))
}

async fn not_found() -> R<()> {
    R::<()>::err(E::Code(Code::NotFound.as_i32()))
}

async fn internal_error() -> R<()> {
    R::<()>::err(E::Sys(anyhow::anyhow!("boom")))
}

async fn switch(locale: RequestLocale) -> Result<R<bool>, E> {
    let changed = locale.localizer().change_language("fr")?;
    Ok(R::ok(changed))
}

fn app() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/echo", post(echo))
        .route("/gone", get(not_found))
        .route("/boom", get(internal_error))
        .route("/switch", get(switch))
}

fn router(default_language: &str, negotiate: bool) -> Router {
    let localizer = Localizer::new(
        ResourceSet::aggregate([resp::translations()]),
        LocalizerOptions {
            default_language: LanguageCode::parse(default_language).unwrap(),
            ..Default::default()
        },
    );
    WebServer::new("127.0.0.1:0")
        .mount(app())
        .layer_i18n(Arc::new(localizer), negotiate)
        .into_router()
}

async fn request(
    router: Router,
    method: &str,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
    accept_language: Option<&str>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(v) = content_type {
        builder = builder.header("content-type", v);
    }

    if let Some(v) = accept_language {
        builder = builder.header("accept-language", v);
    }

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn request_get(
    router: Router,
    uri: &str,
    accept_language: Option<&str>,
) -> (StatusCode, String) {
    request(router, "GET", uri, Body::empty(), None, accept_language).await
}

async fn request_json(
    router: Router,
    uri: &str,
    json: &str,
    accept_language: Option<&str>,
) -> (StatusCode, String) {
    request(
        router,
        "POST",
        uri,
        Body::from(json.to_owned()),
        Some("application/json"),
        accept_language,
    )
    .await
}

#[tokio::test]
async fn ok_is_localized_in_the_current_language() {
    let (status_en, body_en) = request_get(router("en", false), "/ping", None).await;
    assert_eq!(status_en, StatusCode::OK);
    assert!(body_en.contains("\"code\":200"));
    assert!(body_en.contains("\"message\":\"Ok\""));
    assert!(body_en.contains("\"data\":{\"pong\":true}"));

    let (status_nl, body_nl) = request_get(router("nl", false), "/ping", None).await;
    assert_eq!(status_nl, StatusCode::OK);
    assert!(body_nl.contains("\"message\":\"Gelukt\""));
}

#[tokio::test]
async fn query_and_accept_language_select_the_message_language() {
    let (_, body) = request_get(router("en", false), "/ping?lng=nl", None).await;
    assert!(body.contains("\"message\":\"Gelukt\""));

    let (_, ignored) = request_get(router("en", false), "/ping", Some("nl-NL,nl;q=0.9")).await;
    assert!(ignored.contains("\"message\":\"Ok\""));

    let (_, negotiated) = request_get(router("en", true), "/ping", Some("nl-NL,nl;q=0.9")).await;
    assert!(negotiated.contains("\"message\":\"Gelukt\""));
}

#[tokio::test]
async fn non_500_business_errors_keep_http_200_and_are_localized() {
    let (status_en, body_en) = request_get(router("en", false), "/gone", None).await;
    assert_eq!(status_en, StatusCode::OK);
    assert!(body_en.contains("\"code\":404"));
    assert!(body_en.contains("\"message\":\"Not Found\""));
    assert!(body_en.contains("\"data\":null"));

    let (status_nl, body_nl) = request_get(router("nl", false), "/gone", None).await;
    assert_eq!(status_nl, StatusCode::OK);
    assert!(body_nl.contains("\"message\":\"Niet gevonden\""));
}

#[tokio::test]
async fn json_params_are_validated_and_return_business_codes() {
    let (status_ok, body_ok) =
        request_json(router("en", false), "/echo", r#"{"name":"jack","age":18}"#, None).await;
    assert_eq!(status_ok, StatusCode::OK);
    assert!(body_ok.contains("\"code\":200"));
    assert!(body_ok.contains("\"data\":{\"name\":\"jack\",\"age\":18}"));

    let (status_missing, body_missing) =
        request_json(router("nl", false), "/echo", r#"{"name":"jack"}"#, None).await;
    assert_eq!(status_missing, StatusCode::OK);
    assert!(body_missing.contains("\"code\":901"));
    assert!(body_missing.contains("\"message\":\"Verplichte parameter ontbreekt\""));
    assert!(body_missing.contains("\"data\":null"));

    let (status_illegal, body_illegal) =
        request_json(router("en", false), "/echo", r#"{"name":"","age":18}"#, None).await;
    assert_eq!(status_illegal, StatusCode::OK);
    assert!(body_illegal.contains("\"code\":902"));
    assert!(body_illegal.contains("\"message\":\"Illegal Parameter\""));

    let (status_parse, _) = request_json(
        router("en", false),
        "/echo",
        r#"{"name":"jack","age":"abc"}"#,
        None,
    )
    .await;
    // Axum rejects bodies that do not deserialize before the handler runs.
    assert_eq!(status_parse, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn internal_errors_map_to_http_500_and_are_localized() {
    let (status, body) = request_get(router("en", false), "/boom", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("\"code\":500"));
    assert!(body.contains("\"message\":\"Internal Server Error\""));
}

#[tokio::test]
async fn i18n_errors_carry_their_parameters() {
    let (status, body) = request_get(router("en", false), "/switch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"code\":1001"));
    assert!(body.contains("\"message\":\"Unsupported language: fr\""));
}

#[tokio::test]
async fn unknown_route_returns_http_404_from_axum() {
    let (status, _) = request_get(router("en", false), "/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Integration tests for the workspace dashboard
//!
//! These tests drive the full router against a mocked remote API and check
//! the rendered pages, redirects and status codes.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use workspace_dashboard::{
    config::Config,
    i18n::{CatalogValidator, Catalogs, Locale},
    pages,
    remote::RemoteClient,
    retry::RetryConfig,
    server::{router, AppState},
};

// ==================== Test Helpers ====================

/// Create a test config pointing at the mocked remote API
fn create_test_config(api_url: &str) -> Config {
    Config {
        environment: "test".to_string(),
        port: 0,
        api_url: api_url.to_string(),
        api_token: None,
        query_deadline: Duration::from_secs(2),
        admin_api_key: Some("test-api-key".to_string()),
        default_locale: Locale::ENGLISH,
        locales_dir: None,
        create_workspace_url: "/workspaces/new".to_string(),
    }
}

fn create_app(server: &MockServer) -> Router {
    let api_url = format!("{}/trpc", server.uri());
    let config = create_test_config(&api_url);
    let client = RemoteClient::new(&api_url, None)
        .expect("client")
        .with_retry(RetryConfig::none());
    let catalogs = Catalogs::embedded().expect("embedded catalogs");
    router(AppState::new(config, catalogs, client))
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "result": { "data": data } })
}

async fn mock_workspaces(server: &MockServer, workspaces: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/trpc/workspace.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(workspaces)))
        .mount(server)
        .await;
}

async fn mock_stats(server: &MockServer, stats: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/trpc/admin.stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(stats)))
        .mount(server)
        .await;
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

// ==================== Catalog Tests ====================

#[test]
fn test_embedded_catalogs_cover_every_page_key() {
    let catalogs = Catalogs::embedded().expect("embedded catalogs");
    let report = CatalogValidator::validate(&catalogs, &pages::required_keys());

    assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    assert_eq!(catalogs.locales().len(), 2);
}

#[test]
fn test_catalog_directory_with_short_menu_fails_validation() {
    let temp_dir = TempDir::new().expect("temp dir");
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let en = std::fs::read_to_string(manifest.join("locales/en.json")).expect("en.json");
    let mut es: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(manifest.join("locales/es.json")).expect("es.json"))
            .expect("es parses");
    es["dashboard"]["menu"]
        .as_array_mut()
        .expect("menu list")
        .truncate(7);

    std::fs::write(temp_dir.path().join("en.json"), en).unwrap();
    std::fs::write(temp_dir.path().join("es.json"), es.to_string()).unwrap();

    let catalogs = Catalogs::load_dir(temp_dir.path()).expect("load");
    let report = CatalogValidator::validate(&catalogs, &pages::required_keys());

    assert!(report.has_errors());
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("[es]") && e.contains("dashboard.menu")));
}

#[test]
fn test_catalog_directory_with_extra_scenario_fails_validation() {
    let temp_dir = TempDir::new().expect("temp dir");
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    // Same extra entry in every locale, so the locales still agree
    for code in ["en", "es"] {
        let source = std::fs::read_to_string(manifest.join(format!("locales/{}.json", code)))
            .expect("catalog");
        let mut catalog: serde_json::Value = serde_json::from_str(&source).expect("parses");
        catalog["demo"]["scenarios"]
            .as_array_mut()
            .expect("scenario list")
            .push(json!({ "scenario": "Invite", "desc": "An owner invites a teammate." }));
        std::fs::write(temp_dir.path().join(format!("{}.json", code)), catalog.to_string()).unwrap();
    }

    let catalogs = Catalogs::load_dir(temp_dir.path()).expect("load");
    let report = CatalogValidator::validate(&catalogs, &pages::required_keys());

    assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
    assert!(report
        .errors
        .iter()
        .all(|e| e.contains("'demo.scenarios' is list of 5 records")));
}

// ==================== Health Tests ====================

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let (status, _, body) = get(create_app(&server), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

// ==================== Redirect Page Tests ====================

#[tokio::test]
async fn test_dashboard_redirects_to_first_workspace() {
    let server = MockServer::start().await;
    mock_workspaces(
        &server,
        json!([{ "slug": "acme", "name": "Acme" }, { "slug": "globex", "name": "Globex" }]),
    )
    .await;

    let (status, headers, _) = get(create_app(&server), "/dashboard").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/dashboard/acme");
}

#[tokio::test]
async fn test_dashboard_redirect_encodes_slug_with_space() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "my team", "name": "My team" }])).await;

    let (status, headers, _) = get(create_app(&server), "/dashboard").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/dashboard/my%20team");
}

#[tokio::test]
async fn test_dashboard_redirect_encodes_control_characters() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "bad\nslug", "name": "Bad" }])).await;

    let (status, headers, _) = get(create_app(&server), "/dashboard").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/dashboard/bad%0Aslug");
}

#[tokio::test]
async fn test_encoded_workspace_path_resolves() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "my team", "name": "My team" }])).await;

    let (status, _, body) = get(create_app(&server), "/dashboard/my%20team/reports").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Reports generated for my team."));
    assert!(body.contains(r#"href="/dashboard/my%20team/members""#));
}

#[tokio::test]
async fn test_dashboard_without_workspaces_shows_onboarding() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([])).await;

    let (status, _, body) = get(create_app(&server), "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No workspaces yet"));
    assert!(body.contains(r#"href="/workspaces/new""#));
}

#[tokio::test]
async fn test_dashboard_remote_failure_shows_error_panel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trpc/workspace.list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, _, body) = get(create_app(&server), "/dashboard").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("We could not load your workspaces."));
}

#[tokio::test]
async fn test_dashboard_slow_remote_shows_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trpc/workspace.list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([])))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let api_url = format!("{}/trpc", server.uri());
    let mut config = create_test_config(&api_url);
    config.query_deadline = Duration::from_millis(100);
    let client = RemoteClient::new(&api_url, None)
        .unwrap()
        .with_retry(RetryConfig::none());
    let app = router(AppState::new(config, Catalogs::embedded().unwrap(), client));

    let (status, _, body) = get(app, "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Looking up your workspaces…"));
    assert!(body.contains(r#"http-equiv="refresh""#));
}

// ==================== Workspace Page Tests ====================

#[tokio::test]
async fn test_overview_renders_stats_with_missing_values() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "acme", "name": "Acme" }])).await;
    mock_stats(&server, json!([324, null])).await;

    let (status, _, body) = get(create_app(&server), "/dashboard/acme").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Overview</h1>"));
    assert!(body.contains("Everything happening in acme at a glance."));
    assert!(body.contains(r#"<span class="stat-value">324</span>"#));
    assert!(body.contains(r#"<span class="stat-value">-</span>"#));
}

#[tokio::test]
async fn test_overview_stats_failure_keeps_page() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "acme", "name": "Acme" }])).await;
    Mock::given(method("GET"))
        .and(path("/trpc/admin.stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, _, body) = get(create_app(&server), "/dashboard/acme").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Something went wrong."));
    assert!(body.contains("<h1>Overview</h1>"));
}

#[tokio::test]
async fn test_section_page_in_spanish() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "acme", "name": "Acme" }])).await;

    let (status, _, body) = get(create_app(&server), "/dashboard/acme/settings?lang=es").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<html lang="es">"#));
    assert!(body.contains("<h1>Configuración</h1>"));
    assert!(body.contains("Configuración de acme."));
}

#[tokio::test]
async fn test_accept_language_selects_locale() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "acme", "name": "Acme" }])).await;

    let request = Request::builder()
        .uri("/dashboard/acme/members")
        .header(header::ACCEPT_LANGUAGE, "fr-FR, es;q=0.8, en;q=0.5")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(create_app(&server), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<html lang="es">"#));
}

#[tokio::test]
async fn test_unknown_workspace_falls_back_to_first() {
    let server = MockServer::start().await;
    mock_workspaces(&server, json!([{ "slug": "acme", "name": "Acme" }])).await;
    mock_stats(&server, json!([1, 2, 3, 4])).await;

    let (status, _, body) = get(create_app(&server), "/dashboard/initech").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Workspace not found"));
    assert!(body.contains("initech"));
    assert!(body.contains(r#"href="/dashboard/acme""#));
}

#[tokio::test]
async fn test_unknown_section_links_back_to_workspace() {
    let server = MockServer::start().await;

    let (status, _, body) = get(create_app(&server), "/dashboard/acme/billing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
    assert!(body.contains(r#"href="/dashboard/acme""#));
}

#[tokio::test]
async fn test_unknown_path_links_to_dashboard() {
    let server = MockServer::start().await;

    let (status, _, body) = get(create_app(&server), "/nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(r#"href="/dashboard""#));
}

// ==================== Demo Tests ====================

#[tokio::test]
async fn test_demo_steps_render() {
    let server = MockServer::start().await;

    for (step, expected) in [
        ("scenarios", "12 cases"),
        ("endpoints", "HTTP 204 in 31 ms"),
        ("browsers", "Firefox"),
    ] {
        let (status, _, body) = get(create_app(&server), &format!("/demo/{}", step)).await;
        assert_eq!(status, StatusCode::OK, "step {}", step);
        assert!(body.contains(expected), "step {} missing {}", step, expected);
        assert!(body.contains("animation-delay: 150ms"));
    }
}

#[tokio::test]
async fn test_demo_in_spanish() {
    let server = MockServer::start().await;

    let (status, _, body) = get(create_app(&server), "/demo/scenarios?lang=es").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Describe tus escenarios"));
    assert!(body.contains("1 caso"));
}

#[tokio::test]
async fn test_unknown_demo_step() {
    let server = MockServer::start().await;

    let (status, _, _) = get(create_app(&server), "/demo/pricing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ==================== Metrics Endpoint Tests ====================

#[tokio::test]
async fn test_metrics_requires_api_key() {
    let server = MockServer::start().await;

    let (status, _, _) = get(create_app(&server), "/api/i18n/metrics").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/i18n/metrics")
        .header("X-API-Key", "wrong-key")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(create_app(&server), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_metrics_with_api_key() {
    let server = MockServer::start().await;

    // Generate some lookups first
    let _ = get(create_app(&server), "/demo/browsers").await;

    let request = Request::builder()
        .uri("/api/i18n/metrics")
        .header("X-API-Key", "test-api-key")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(create_app(&server), request).await;

    assert_eq!(status, StatusCode::OK);
    let report: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert!(report["lookups"].as_u64().unwrap() > 0);
    assert!(report.get("hit_rate").is_some());
}

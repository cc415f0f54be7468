//! HTTP surface.

use crate::config::Config;
use crate::i18n::{Catalogs, Locale, LookupMetrics, MetricsReport, Translator};
use crate::menu::MenuKey;
use crate::pages::demo::{self, DemoStep};
use crate::pages::layout::{document, html_escape};
use crate::pages::not_found::{self, NotFoundVariant};
use crate::pages::redirect::{self, RedirectState};
use crate::pages::workspace;
use crate::remote::{observe, AdminStats, QueryState, RemoteClient, ADMIN_STATS, WORKSPACE_LIST};
use crate::security::admin_authorized;
use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalogs: Arc<Catalogs>,
    pub client: RemoteClient,
}

impl AppState {
    pub fn new(config: Config, catalogs: Catalogs, client: RemoteClient) -> Self {
        Self {
            config: Arc::new(config),
            catalogs: Arc::new(catalogs),
            client,
        }
    }

    fn locale(&self, query: &LangQuery, headers: &HeaderMap) -> Locale {
        let accept = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Locale::negotiate(query.lang.as_deref(), accept, self.config.default_locale)
    }

    /// Translator for the request, falling back to the canonical catalog.
    fn translator(&self, query: &LangQuery, headers: &HeaderMap) -> Result<Translator<'_>, Response> {
        let locale = self.locale(query, headers);
        self.catalogs
            .translator(locale)
            .or_else(|e| {
                warn!("{}, using canonical catalog", e);
                self.catalogs.translator(Locale::canonical())
            })
            .map_err(|e| {
                error!("No catalog available: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response()
            })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard_redirect))
        .route("/dashboard/:workspace", get(workspace_overview))
        .route("/dashboard/:workspace/:section", get(workspace_section))
        .route("/demo/:step", get(demo_step))
        .route("/api/i18n/metrics", get(i18n_metrics))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}

fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

async fn health() -> &'static str {
    "ok"
}

async fn dashboard_redirect(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Response {
    let t = match state.translator(&query, &headers) {
        Ok(t) => t,
        Err(response) => return response,
    };

    let workspaces = observe(
        WORKSPACE_LIST,
        state.config.query_deadline,
        state.client.workspace_list(),
    )
    .await;

    let redirect_state = RedirectState::from_query(&workspaces);
    match &redirect_state {
        RedirectState::Redirecting { target, .. } => Redirect::to(target).into_response(),
        RedirectState::Error => html(
            StatusCode::BAD_GATEWAY,
            redirect::render(&t, &redirect_state, &state.config.create_workspace_url),
        ),
        RedirectState::Loading | RedirectState::Empty => html(
            StatusCode::OK,
            redirect::render(&t, &redirect_state, &state.config.create_workspace_url),
        ),
    }
}

async fn workspace_overview(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Response {
    render_workspace(&state, &query, &headers, &workspace, MenuKey::Overview).await
}

async fn workspace_section(
    State(state): State<AppState>,
    Path((workspace, section)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Response {
    match MenuKey::from_slug(&section) {
        Some(key) => render_workspace(&state, &query, &headers, &workspace, key).await,
        None => {
            let t = match state.translator(&query, &headers) {
                Ok(t) => t,
                Err(response) => return response,
            };
            html(
                StatusCode::NOT_FOUND,
                not_found::render(&t, NotFoundVariant::Dashboard, None, Some(&workspace)),
            )
        }
    }
}

async fn render_workspace(
    state: &AppState,
    query: &LangQuery,
    headers: &HeaderMap,
    workspace: &str,
    key: MenuKey,
) -> Response {
    let t = match state.translator(query, headers) {
        Ok(t) => t,
        Err(response) => return response,
    };
    let deadline = state.config.query_deadline;

    let list = observe(WORKSPACE_LIST, deadline, state.client.workspace_list());
    let (workspaces, stats) = if workspace::uses_stats(key) {
        let stats = observe(ADMIN_STATS, deadline, state.client.admin_stats());
        futures::future::join(list, stats).await
    } else {
        (list.await, QueryState::<AdminStats>::Loading)
    };

    // Membership can only be decided once the list has loaded
    if let QueryState::Success(list) = &workspaces {
        if !list.iter().any(|w| w.slug == workspace) {
            let fallback = list.first().map(|w| w.slug.as_str());
            return html(
                StatusCode::NOT_FOUND,
                not_found::render(&t, NotFoundVariant::Workspace, Some(workspace), fallback),
            );
        }
    }

    let page = workspace::render(&t, key, workspace, &stats, chrono::Utc::now());
    html(StatusCode::OK, page.html)
}

async fn demo_step(
    State(state): State<AppState>,
    Path(step): Path<String>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Response {
    let t = match state.translator(&query, &headers) {
        Ok(t) => t,
        Err(response) => return response,
    };

    let Some(step) = DemoStep::from_slug(&step) else {
        return html(
            StatusCode::NOT_FOUND,
            not_found::render(&t, NotFoundVariant::Dashboard, None, None),
        );
    };

    match demo::render(&t, step) {
        Ok(page) => html(StatusCode::OK, page),
        Err(e) => {
            error!("[{}] demo step '{}': {}", t.locale().code(), step.slug(), e);
            let message = t.t("common.error");
            let body = format!(r#"<main class="panel error"><p>{}</p></main>"#, html_escape(&message));
            html(
                StatusCode::INTERNAL_SERVER_ERROR,
                document(t.locale(), &message, &body, None),
            )
        }
    }
}

async fn i18n_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MetricsReport>, StatusCode> {
    let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if !admin_authorized(state.config.admin_api_key.as_deref(), provided) {
        warn!("Rejected metrics request with invalid API key");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Json(LookupMetrics::global().report()))
}

async fn fallback(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Response {
    let t = match state.translator(&query, &headers) {
        Ok(t) => t,
        Err(response) => return response,
    };
    html(
        StatusCode::NOT_FOUND,
        not_found::render(&t, NotFoundVariant::Dashboard, None, None),
    )
}

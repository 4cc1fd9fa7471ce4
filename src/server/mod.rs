//! HTTP server: listing, load-more, post and preview routes

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::cms::{CmsClient, ContentFetcher};
use crate::config::SiteConfig;
use crate::helpers::html_escape;
use crate::listing::ViewState;
use crate::templates::TemplateRenderer;
use crate::Blogfront;

/// Server state
pub struct ServerState {
    config: SiteConfig,
    fetcher: Arc<dyn ContentFetcher>,
    renderer: TemplateRenderer,
    /// Listing state for the current page view. Rendering the listing
    /// replaces it wholesale; a successful load-more swaps in the grown
    /// state. Never mutated in place.
    listing: Mutex<Option<ViewState>>,
}

impl ServerState {
    fn new(config: SiteConfig, fetcher: Arc<dyn ContentFetcher>) -> Result<Self> {
        Ok(Self {
            config,
            fetcher,
            renderer: TemplateRenderer::new()?,
            listing: Mutex::new(None),
        })
    }
}

/// Start the server for an application instance
pub async fn start(app: &Blogfront, ip: &str, port: u16) -> Result<()> {
    let fetcher = Arc::new(CmsClient::new(app.config.cms.clone())?);
    serve(app.config.clone(), fetcher, ip, port).await
}

/// Run the server with an explicit fetcher
pub async fn serve(
    config: SiteConfig,
    fetcher: Arc<dyn ContentFetcher>,
    ip: &str,
    port: u16,
) -> Result<()> {
    let state = Arc::new(ServerState::new(config, fetcher)?);
    let app = build_router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Server running at http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/load-more", get(load_more_handler))
        .route("/post/:id", get(post_handler))
        .route("/api/exit-preview", get(exit_preview_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Listing page: fetch the first page, build a fresh view state
async fn index_handler(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    let cms = &state.config.cms;
    let page = match state.fetcher.fetch_first_page(cms.page_size, &cms.lang).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("initial page fetch failed: {}", e);
            return error_page(StatusCode::BAD_GATEWAY, "Não foi possível carregar o blog");
        }
    };

    let view = ViewState::initialize(&page);
    *state.listing.lock().await = Some(view.clone());

    render_listing(&state, &view, &headers, None)
}

#[derive(Deserialize)]
struct LoadMoreParams {
    #[serde(default)]
    from: String,
}

/// Follow the continuation token and append the next page
async fn load_more_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(params): Query<LoadMoreParams>,
) -> Response {
    let mut listing = state.listing.lock().await;

    let Some(current) = listing.clone() else {
        // No page view in progress, start over
        return Redirect::to("/").into_response();
    };

    // Duplicate or stale request: the token in the link was already
    // consumed by an earlier call. Ignore it and re-render as-is.
    if current.continuation_token.as_deref() != Some(params.from.as_str()) {
        tracing::debug!("ignoring load-more with stale token");
        return render_listing(&state, &current, &headers, None);
    }

    match current.load_more(state.fetcher.as_ref()).await {
        Ok(next) => {
            *listing = Some(next.clone());
            render_listing(&state, &next, &headers, None)
        }
        Err(e) => {
            tracing::warn!("load more failed: {}", e);
            render_listing(
                &state,
                &current,
                &headers,
                Some("Não foi possível carregar mais posts"),
            )
        }
    }
}

/// Individual post page
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let document = match state.fetcher.fetch_post(&id).await {
        Ok(document) => document,
        Err(e) if e.is_not_found() => {
            return error_page(StatusCode::NOT_FOUND, "Post não encontrado");
        }
        Err(e) => {
            tracing::error!("post fetch failed for {}: {}", id, e);
            return error_page(StatusCode::BAD_GATEWAY, "Não foi possível carregar o post");
        }
    };

    let preview = has_preview_cookie(&headers, &state.config.preview.cookie);
    match state.renderer.render_post(&state.config, &document, preview) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("template error: {}", e);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno")
        }
    }
}

/// Clear the preview cookie and return to the listing
async fn exit_preview_handler(State(state): State<Arc<ServerState>>) -> Response {
    let expired = format!("{}=; Path=/; Max-Age=0", state.config.preview.cookie);
    ([(header::SET_COOKIE, expired)], Redirect::to("/")).into_response()
}

/// Render the listing template for a given state
fn render_listing(
    state: &ServerState,
    view: &ViewState,
    headers: &HeaderMap,
    error: Option<&str>,
) -> Response {
    let preview = has_preview_cookie(headers, &state.config.preview.cookie);
    match state
        .renderer
        .render_listing(&state.config, view, preview, error)
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("template error: {}", e);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno")
        }
    }
}

/// Whether the hosting environment's preview cookie is present
fn has_preview_cookie(headers: &HeaderMap, cookie_name: &str) -> bool {
    let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    cookies
        .split(';')
        .map(str::trim)
        .any(|cookie| cookie.split('=').next() == Some(cookie_name))
}

/// Minimal error page, kept template-free so it cannot itself fail
fn error_page(status: StatusCode, message: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html><html><body><main><p>{}</p><a href=\"/\">Voltar</a></main></body></html>",
        html_escape(message)
    );
    (status, Html(html)).into_response()
}

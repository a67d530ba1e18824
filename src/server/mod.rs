//! HTTP server: the live feed endpoint plus static files

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::feed::FeedDocument;
use crate::Site;

/// Content type of the feed response
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Server state
struct ServerState {
    site: Site,
}

/// Build the router: `/rss.xml` is rendered per request, the rest is served
/// from the public directory
pub fn router(site: Site) -> Router {
    let public_dir = site.public_dir.clone();
    let state = Arc::new(ServerState { site });

    Router::new()
        .route(&format!("/{}", FeedDocument::PATH), get(feed_handler))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Feed: http://{}:{}/{}", ip, port, FeedDocument::PATH);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    feed_response(&state.site)
}

/// Render the feed from the current content, or a 500 without any partial document
pub fn feed_response(site: &Site) -> Response {
    match site.render_feed().and_then(|doc| doc.to_xml()) {
        Ok(xml) => ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            tracing::error!("Failed to render feed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

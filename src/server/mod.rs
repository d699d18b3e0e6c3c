//! Content server: JSON post API plus the built single-page frontend

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::content::{DirectoryRepository, Post, PostStore};
use crate::{error, Folio};

/// Server state
struct ServerState {
    store: PostStore<DirectoryRepository>,
    dist_dir: PathBuf,
}

/// Build the application router
pub fn router(folio: &Folio) -> Router {
    let state = Arc::new(ServerState {
        store: folio.store(),
        dist_dir: folio.dist_dir.clone(),
    });

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:id", get(get_post))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the content server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving posts from {:?}", folio.posts_dir);
    tracing::info!("Serving frontend from {:?}", folio.dist_dir);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a store operation off the async runtime
async fn with_store<T, F>(state: &Arc<ServerState>, f: F) -> Result<T>
where
    F: FnOnce(&PostStore<DirectoryRepository>) -> error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || f(&state.store)).await?;
    Ok(result?)
}

/// GET /api/posts
async fn list_posts(State(state): State<Arc<ServerState>>) -> Json<Vec<Post>> {
    match with_store(&state, |store| store.load_posts()).await {
        Ok(posts) => Json(posts),
        Err(e) => {
            tracing::error!("Failed to list posts: {}", e);
            Json(Vec::new())
        }
    }
}

/// GET /api/posts/:id
async fn get_post(State(state): State<Arc<ServerState>>, Path(id): Path<String>) -> Response {
    let lookup = id.clone();
    match with_store(&state, move |store| store.find_post(&lookup)).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => {
            tracing::debug!("Post not found: {}", id);
            (StatusCode::NOT_FOUND, Json(json!({ "error": "Post not found" }))).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load post {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch" })),
            )
                .into_response()
        }
    }
}

/// Serve the frontend; unknown routes get index.html for client-side routing
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    if request.uri().path().starts_with("/api") {
        return (StatusCode::NOT_FOUND, "API endpoint not found").into_response();
    }

    let index = state.dist_dir.join("index.html");
    let mut service = ServeDir::new(&state.dist_dir).fallback(ServeFile::new(index));
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

//! HTTP API server

mod blogs;
mod error;
mod users;

pub use error::ApiError;

use anyhow::Result;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AuthError, Claims};
use crate::store::Store;
use crate::Bloglist;

/// Shared state for all handlers
pub struct AppState {
    pub store: Store,
    /// Token signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub token_ttl: i64,
    pub password_iterations: u32,
}

impl AppState {
    /// Claims of the caller, if a token was sent
    ///
    /// A token that is present but malformed or invalid is an error, not `None`.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Option<Claims>, ApiError> {
        let header = match headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| ApiError::token_invalid())?),
            None => None,
        };

        match auth::extract_bearer(header) {
            Ok(token) => Ok(Some(auth::verify_token(&self.secret, token)?)),
            Err(AuthError::MissingToken) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route("/api/blogs/stats", get(blogs::stats))
        .route(
            "/api/blogs/:id",
            get(blogs::show).put(blogs::update).delete(blogs::remove),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/login", post(users::login))
        .fallback(unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn unknown_endpoint() -> ApiError {
    ApiError::NotFound("unknown endpoint".to_string())
}

/// Start the API server
pub async fn start(app: &Bloglist, ip: &str, port: u16) -> Result<()> {
    let secret = app.config.require_secret()?.to_string();
    let store = Store::open(&app.data_path)?;

    let state = Arc::new(AppState {
        store,
        secret,
        token_ttl: app.config.token_ttl,
        password_iterations: app.config.password_iterations,
    });

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Data file: {}", app.data_path.display());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

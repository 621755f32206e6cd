pub mod appresult;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod page;
pub mod profiles;
pub mod quotes;
pub mod res;
pub mod session;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// Builds the whole application: routes, shared state, sessions and request tracing.
pub fn app(db_pool: SqlitePool, config: &Config) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.session_inactivity_minutes,
        )));

    Router::new()
        .route("/style.css", get(res::stylesheet))
        .merge(index::router())
        .merge(auth::router())
        .merge(quotes::router())
        .nest("/profile", profiles::router())
        .with_state(AppState { db_pool })
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

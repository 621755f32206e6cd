pub mod card;
pub mod feed;
mod new;
pub mod repo;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use feed::{FeedKind, FeedState};
pub use repo::NewQuote;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", get(new::new_quote_page).post(new::new_quote))
        .route("/quotes/{id}/delete", post(card::delete))
}

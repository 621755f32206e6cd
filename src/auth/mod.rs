mod identity;
mod login;
mod logout;
pub mod password;

use axum::{routing::get, Router};

use crate::AppState;

pub use identity::{current_user, sign_in, sign_out, sign_up, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", get(login::auth_page).post(login::submit_auth))
        .route("/logout", get(logout::logout).post(logout::logout))
}

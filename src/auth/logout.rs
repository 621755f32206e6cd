use axum::{debug_handler, extract::Query, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;

use crate::AppResult;

use super::sign_out;

#[derive(Deserialize)]
pub(crate) struct LogoutQuery {
    pub(crate) return_url: Option<String>,
}

#[debug_handler]
pub(crate) async fn logout(
    Query(LogoutQuery { return_url }): Query<LogoutQuery>,
    session: Session
) -> AppResult<Redirect> {
    sign_out(&session).await;

    // only same-site paths, never another host
    let return_url = return_url
        .filter(|url| url.starts_with('/') && !url.starts_with("//"))
        .unwrap_or("/".to_string());
    Ok(Redirect::to(return_url.as_str()))
}

use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    auth::current_user,
    include_res, page,
    quotes::{feed, FeedKind, FeedState},
    AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/feed", get(public_feed))
}

#[debug_handler]
pub async fn index(session: Session) -> AppResult<Response> {
    let user = current_user(&session).await?;

    let share_button = match user {
        Some(_) => r#"<a class="button button-primary" href="/submit">+ Share a Quote</a>"#,
        None => "",
    };
    let body = include_res!(str, "/pages/index.html")
        .replace("{share_button}", share_button)
        .replace("{feed}", &feed::render(&FeedState::Loading, FeedKind::Public, user.as_ref()));

    Ok(page::render(&session, user.as_ref(), "QuickQuotes", &body).await?.into_response())
}

#[debug_handler(state = AppState)]
pub async fn public_feed(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Html<String>> {
    let user = current_user(&session).await?;
    let state = feed::load(&db_pool, FeedKind::Public).await;

    Ok(Html(feed::render(&state, FeedKind::Public, user.as_ref())))
}

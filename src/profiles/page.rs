use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    auth::current_user,
    include_res, page,
    quotes::{feed, FeedKind, FeedState},
    AppResult, AppState,
};

#[debug_handler]
pub(crate) async fn profile(session: Session) -> AppResult<Response> {
    let Some(user) = current_user(&session).await? else {
        return Ok(Redirect::to("/auth").into_response());
    };

    let loading = feed::render(&FeedState::Loading, FeedKind::Owner(user.id), Some(&user));
    let body = include_res!(str, "/pages/profile.html").replace("{feed}", &loading);

    Ok(page::render(&session, Some(&user), "Your Quotes", &body).await?.into_response())
}

/// The owner feed with its count, so both always come from the same fetch.
#[debug_handler(state = AppState)]
pub(crate) async fn owner_feed(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = current_user(&session).await? else {
        return Ok(Redirect::to("/auth").into_response());
    };

    let kind = FeedKind::Owner(user.id);
    let state = feed::load(&db_pool, kind).await;

    Ok(Html(
        include_res!(str, "/pages/profile_feed.html")
            .replace("{count}", &state.quote_count().to_string())
            .replace("{count_line}", feed::count_line(state.quote_count()))
            .replace("{feed}", &feed::render(&state, kind, Some(&user)))
    ).into_response())
}

use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    auth::{current_user, CurrentUser},
    error::WriteError,
    include_res,
    page::{self, escape},
    session::{push_flash, Flash},
    AppResult, AppState,
};

use super::repo::{self, NewQuote};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewQuoteForm {
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: String,
}

#[debug_handler]
pub(crate) async fn new_quote_page(session: Session) -> AppResult<Response> {
    let Some(user) = current_user(&session).await? else {
        return Ok(Redirect::to("/auth").into_response());
    };

    render_form(&session, &user, &NewQuoteForm::default()).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn new_quote(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<NewQuoteForm>,
) -> AppResult<Response> {
    let Some(user) = current_user(&session).await? else {
        return Ok(Redirect::to("/auth").into_response());
    };

    let created = match NewQuote::new(&form.content, Some(form.author.as_str())) {
        Ok(quote) => repo::create(&db_pool, &quote, user.id).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(_) => {
            push_flash(&session, Flash::success("Quote submitted successfully!")).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(WriteError::EmptyContent) => {
            push_flash(&session, Flash::error(WriteError::EmptyContent.user_message())).await?;
            render_form(&session, &user, &form).await
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = %user.id, "failed to submit quote");
            let message = format!("Failed to submit quote: {}", e.user_message());
            push_flash(&session, Flash::error(message)).await?;
            render_form(&session, &user, &form).await
        }
    }
}

/// The form keeps whatever was typed, so a failed submit can be retried as is.
async fn render_form(
    session: &Session,
    user: &CurrentUser,
    form: &NewQuoteForm,
) -> AppResult<Response> {
    let body = include_res!(str, "/pages/submit.html")
        .replace("{content}", &escape(&form.content))
        .replace("{author}", &escape(&form.author))
        .replace("{characters}", &form.content.chars().count().to_string());

    Ok(page::render(session, Some(user), "Submit a Quote", &body).await?.into_response())
}

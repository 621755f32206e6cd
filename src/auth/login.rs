use axum::{
    debug_handler,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{include_res, page::{self, escape}, session::{push_flash, Flash}, AppResult, AppState};

use super::{current_user, sign_in, sign_up, password::MIN_PASSWORD_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Deserialize)]
pub(crate) struct AuthQuery {
    pub(crate) mode: Option<String>,
}

impl AuthQuery {
    fn mode(&self) -> AuthMode {
        match self.mode.as_deref() {
            Some("signup") => AuthMode::SignUp,
            _ => AuthMode::SignIn,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct AuthForm {
    email: String,
    password: String,
    #[serde(default)]
    username: Option<String>,
}

#[debug_handler]
pub(crate) async fn auth_page(
    Query(query): Query<AuthQuery>,
    session: Session,
) -> AppResult<Response> {
    if current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    render_form(&session, query.mode(), "").await
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit_auth(
    Query(query): Query<AuthQuery>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(AuthForm { email, password, username }): Form<AuthForm>,
) -> AppResult<Response> {
    let mode = query.mode();
    let result = match mode {
        AuthMode::SignIn => sign_in(&db_pool, &session, &email, &password).await,
        AuthMode::SignUp => {
            sign_up(&db_pool, &session, &email, &password, username.as_deref()).await
        }
    };

    match result {
        Ok(_) => {
            let message = match mode {
                AuthMode::SignIn => "Signed in successfully!",
                AuthMode::SignUp => "Account created successfully!",
            };
            push_flash(&session, Flash::success(message)).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, ?mode, "authentication failed");
            push_flash(&session, Flash::error(e.user_message())).await?;
            render_form(&session, mode, &email).await
        }
    }
}

async fn render_form(session: &Session, mode: AuthMode, email: &str) -> AppResult<Response> {
    let (title, description, action, button, switch) = match mode {
        AuthMode::SignIn => (
            "Welcome Back",
            "Sign in to your QuickQuotes account",
            "/auth",
            "Sign In",
            r#"Don't have an account? <a href="/auth?mode=signup">Create one</a>"#,
        ),
        AuthMode::SignUp => (
            "Create Account",
            "Join QuickQuotes to share and discover inspiring quotes",
            "/auth?mode=signup",
            "Create Account",
            r#"Already have an account? <a href="/auth">Sign in</a>"#,
        ),
    };
    let username_field = match mode {
        AuthMode::SignIn => "",
        AuthMode::SignUp => include_res!(str, "/pages/auth_username.html"),
    };

    let body = include_res!(str, "/pages/auth.html")
        .replace("{title}", title)
        .replace("{description}", description)
        .replace("{action}", action)
        .replace("{email}", &escape(email))
        .replace("{min_length}", &MIN_PASSWORD_LENGTH.to_string())
        .replace("{username_field}", username_field)
        .replace("{button}", button)
        .replace("{switch}", switch);

    Ok(page::render(session, None, title, &body).await?.into_response())
}

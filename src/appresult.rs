use axum::{http::StatusCode, response::{Html, IntoResponse, Response}};

pub type AppResult<T> = Result<T, AppError>;

/// Failure that has no user-facing recovery path, e.g. the session store going away.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1><p><a href=\"/\">Back to QuickQuotes</a></p>"),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

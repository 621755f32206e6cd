//! Failures the user gets told about. Every variant maps to a notification message;
//! none of them end the request with an error status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("Unable to validate email address: invalid format")]
    InvalidEmail,

    #[error("Password should be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),

    #[error(transparent)]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Hash(_) | AuthError::Store(_) | AuthError::Session(_) => {
                "An unexpected error occurred".to_owned()
            }
            _ => self.to_string(),
        }
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AuthError::Hash(err)
    }
}

#[derive(Debug, Error)]
#[error("failed to fetch quotes: {0}")]
pub struct FetchError(#[from] pub sqlx::Error);

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Please enter quote content")]
    EmptyContent,

    #[error("quote {0} does not exist or is not owned by the requester")]
    NotPermitted(uuid::Uuid),

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl WriteError {
    /// The store's own message when it gave one, otherwise generic wording.
    pub fn user_message(&self) -> String {
        match self {
            WriteError::EmptyContent => self.to_string(),
            WriteError::NotPermitted(_) => "You can only delete your own quotes".to_owned(),
            WriteError::Store(sqlx::Error::Database(db)) => db.message().to_owned(),
            WriteError::Store(_) => "An unexpected error occurred".to_owned(),
        }
    }
}

use std::sync::LazyLock;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{db::{parse_uuid, UserRow}, error::AuthError, session::USER};

use super::password::{self, MIN_PASSWORD_LENGTH};

/// Checked against on unknown emails so they cost as much as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| password::hash_password("quickquotes-dummy-password").ok());

/// The signed-in identity, as every view sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

pub async fn current_user(
    session: &Session,
) -> Result<Option<CurrentUser>, tower_sessions::session::Error> {
    session.get::<CurrentUser>(USER).await
}

pub async fn sign_in(
    db_pool: &SqlitePool,
    session: &Session,
    email: &str,
    password: &str,
) -> Result<CurrentUser, AuthError> {
    let email = normalize_email(email);

    let row: Option<UserRow> =
        sqlx::query_as("SELECT id,username,password_hash FROM users WHERE email=?")
            .bind(&email)
            .fetch_optional(db_pool)
            .await?;
    let Some(row) = row else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = password::verify_password(password, dummy);
        }
        tracing::info!(%email, "sign-in for unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify_password(password, &row.password_hash)? {
        tracing::info!(%email, "sign-in with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let user = CurrentUser { id: parse_uuid(&row.id)?, username: row.username };
    start_session(session, &user).await?;

    tracing::info!(user_id = %user.id, "welcome {}", user.username);
    Ok(user)
}

/// Creates the account and signs it in. A blank `username` gets a generated alias.
pub async fn sign_up(
    db_pool: &SqlitePool,
    session: &Session,
    email: &str,
    password: &str,
    username: Option<&str>,
) -> Result<CurrentUser, AuthError> {
    let email = normalize_email(email);
    if !is_plausible_email(&email) {
        return Err(AuthError::InvalidEmail);
    }
    if !password::is_strong_enough(password) {
        return Err(AuthError::WeakPassword { min_length: MIN_PASSWORD_LENGTH });
    }

    let username = match username.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => generate_alias(),
    };
    let password_hash = password::hash_password(password)?;
    let id = Uuid::now_v7();

    let inserted =
        sqlx::query("INSERT INTO users (id,email,username,password_hash) VALUES (?,?,?,?)")
            .bind(id.to_string())
            .bind(&email)
            .bind(&username)
            .bind(&password_hash)
            .execute(db_pool)
            .await;
    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AuthError::AlreadyRegistered);
        }
        Err(e) => return Err(e.into()),
    }

    let user = CurrentUser { id, username };
    start_session(session, &user).await?;

    tracing::info!(user_id = %user.id, "adding {}", user.username);
    Ok(user)
}

pub async fn sign_out(session: &Session) {
    if let Ok(Some(user)) = current_user(session).await {
        tracing::info!(user_id = %user.id, "goodbye {}", user.username);
    }
    session.clear().await;
}

async fn start_session(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(USER, user).await
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn generate_alias() -> String {
    let adjectives = [
        "Quick", "Lazy", "Mysterious", "Jolly", "Brave", "Silent", "Witty", "Fierce",
        "Clever", "Gentle", "Wild", "Calm", "Bold", "Shy", "Proud", "Happy", "Eager",
        "Fancy", "Rusty", "Golden", "Silver", "Bright", "Lucky", "Wise", "Curious",
    ];
    let nouns = [
        "Fox", "Bear", "Eagle", "Wolf", "Dragon", "Tiger", "Lion", "Owl", "Rabbit",
        "Falcon", "Hawk", "Panda", "Kitten", "Phoenix", "Griffin", "Turtle", "Dolphin",
        "Whale", "Giraffe", "Zebra", "Poet", "Sage", "Scribe", "Bard",
    ];

    let mut rng = rand::rng();
    format!(
        "{} {}",
        adjectives.choose(&mut rng).copied().unwrap_or("Quiet"),
        nouns.choose(&mut rng).copied().unwrap_or("Reader"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn rejects_implausible_emails() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(!is_plausible_email("ada.example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada@"));
        assert!(!is_plausible_email("ada@b@c"));
    }

    #[test]
    fn dummy_hash_never_matches() {
        let dummy = DUMMY_HASH.as_deref().expect("dummy hash should be computed");
        assert!(dummy.starts_with("$argon2id$"));
        assert!(!password::verify_password("hunter22", dummy).expect("dummy hash parses"));
    }

    #[test]
    fn aliases_are_two_words() {
        let alias = generate_alias();
        assert_eq!(alias.split(' ').count(), 2, "{alias}");
    }
}

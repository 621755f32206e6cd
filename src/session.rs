//! Session keys and the one-shot notifications ("toasts") kept alongside them.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

pub const USER: &str = "user";
pub const FLASHES: &str = "flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn class(&self) -> &'static str {
        match self {
            FlashKind::Success => "toast toast-success",
            FlashKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }
}

pub async fn push_flash(
    session: &Session,
    flash: Flash,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes: Vec<Flash> = session.get(FLASHES).await?.unwrap_or_default();
    flashes.push(flash);
    session.insert(FLASHES, flashes).await
}

/// Removes and returns every pending notification.
pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, tower_sessions::session::Error> {
    Ok(session.remove(FLASHES).await?.unwrap_or_default())
}

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub addr: String,
    pub database_url: String,
    pub session_inactivity_minutes: i64,
    pub secure_cookies: bool,
}

impl Config {
    /// Reads the process environment; `main` loads `.env` into it first.
    pub fn load() -> Self {
        Self {
            addr: try_load("QUICKQUOTES_ADDR", "0.0.0.0:8080".to_owned()),
            database_url: try_load("DATABASE_URL", "sqlite://quickquotes.db?mode=rwc".to_owned()),
            session_inactivity_minutes: try_load("SESSION_INACTIVITY_MINUTES", 60),
            secure_cookies: try_load("SECURE_COOKIES", false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_owned(),
            database_url: "sqlite::memory:".to_owned(),
            session_inactivity_minutes: 60,
            secure_cookies: false,
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or_default(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.parse().unwrap_or_else(|e| {
        warn!("invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_values_fall_back_to_default() {
        let minutes: i64 = parse_or_default("SESSION_INACTIVITY_MINUTES", "soon", 60);
        assert_eq!(minutes, 60);

        let secure: bool = parse_or_default("SECURE_COOKIES", "true", false);
        assert!(secure);
    }
}

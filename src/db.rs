use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    tracing::info!("initializing database connection...");
    let in_memory = database_url.contains(":memory:");
    let mut opts = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);
    if !in_memory {
        opts = opts.journal_mode(SqliteJournalMode::Wal);
    }

    // every in-memory connection is its own database
    let max_connections = if in_memory { 1 } else { 16 };
    let mut pool_opts = SqlitePoolOptions::new().max_connections(max_connections);
    if in_memory {
        pool_opts = pool_opts.idle_timeout(None).max_lifetime(None);
    }
    let db_pool = pool_opts
        .connect_with(opts)
        .await?;

    tracing::info!("running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("finished running migrations!");

    Ok(db_pool)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: Uuid,
    pub content: String,
    pub author: Option<String>,
    pub owner_id: Uuid,
    pub owner_display_name: String,
    pub created_at: OffsetDateTime,
}

/// A quote row as the join returns it; ids and timestamps are stored as text.
#[derive(sqlx::FromRow)]
pub(crate) struct QuoteRow {
    id: String,
    content: String,
    author: Option<String>,
    user_id: String,
    username: String,
    created_at: String,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = sqlx::Error;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        Ok(Quote {
            id: parse_uuid(&row.id)?,
            content: row.content,
            author: row.author,
            owner_id: parse_uuid(&row.user_id)?,
            owner_display_name: row.username,
            created_at: OffsetDateTime::parse(&row.created_at, &Rfc3339)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) password_hash: String,
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, sqlx::Error> {
    Uuid::parse_str(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

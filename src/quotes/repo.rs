//! Reads and writes against the quote store. Every function is one round trip and
//! nothing is retried; callers decide how a failure is shown.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db::{Quote, QuoteRow}, error::{FetchError, WriteError}};

/// Quote content that is known to be non-empty after trimming, with the author
/// normalized to `None` when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    content: String,
    author: Option<String>,
}

impl NewQuote {
    pub fn new(content: &str, author: Option<&str>) -> Result<Self, WriteError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(WriteError::EmptyContent);
        }

        let author = author
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .map(str::to_owned);

        Ok(Self { content: content.to_owned(), author })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

const SELECT_QUOTES: &str = "SELECT quotes.id,quotes.content,quotes.author,quotes.user_id,\
    users.username,quotes.created_at FROM quotes INNER JOIN users ON users.id=quotes.user_id";

// rowid breaks ties between quotes stored in the same millisecond
const NEWEST_FIRST: &str = "ORDER BY quotes.created_at DESC, quotes.rowid DESC";

pub async fn list_all(db_pool: &SqlitePool) -> Result<Vec<Quote>, FetchError> {
    let rows: Vec<QuoteRow> = sqlx::query_as(&format!("{SELECT_QUOTES} {NEWEST_FIRST}"))
        .fetch_all(db_pool)
        .await?;

    Ok(rows.into_iter().map(Quote::try_from).collect::<Result<Vec<_>, _>>()?)
}

pub async fn list_by_owner(
    db_pool: &SqlitePool,
    owner_id: Uuid,
) -> Result<Vec<Quote>, FetchError> {
    let sql = format!("{SELECT_QUOTES} WHERE quotes.user_id=? {NEWEST_FIRST}");
    let rows: Vec<QuoteRow> = sqlx::query_as(&sql)
        .bind(owner_id.to_string())
        .fetch_all(db_pool)
        .await?;

    Ok(rows.into_iter().map(Quote::try_from).collect::<Result<Vec<_>, _>>()?)
}

/// Inserts one quote and returns the id the store gave it. Each call adds a row.
pub async fn create(
    db_pool: &SqlitePool,
    quote: &NewQuote,
    owner_id: Uuid,
) -> Result<Uuid, WriteError> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO quotes (id,content,author,user_id) VALUES (?,?,?,?)")
        .bind(id.to_string())
        .bind(quote.content())
        .bind(quote.author())
        .bind(owner_id.to_string())
        .execute(db_pool)
        .await?;

    tracing::info!(quote_id = %id, %owner_id, "quote created");
    Ok(id)
}

/// Deletes one quote. The statement only matches rows owned by `requester`, so a
/// request from anyone else is rejected by the store with [`WriteError::NotPermitted`].
pub async fn delete_by_id(
    db_pool: &SqlitePool,
    id: Uuid,
    requester: Uuid,
) -> Result<(), WriteError> {
    let result = sqlx::query("DELETE FROM quotes WHERE id=? AND user_id=?")
        .bind(id.to_string())
        .bind(requester.to_string())
        .execute(db_pool)
        .await?;

    if result.rows_affected() == 0 {
        tracing::warn!(quote_id = %id, %requester, "delete rejected");
        return Err(WriteError::NotPermitted(id));
    }

    tracing::info!(quote_id = %id, %requester, "quote deleted");
    Ok(())
}

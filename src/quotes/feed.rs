//! A feed goes `Loading -> Populated` or `Loading -> Empty`. Pages render the
//! `Loading` shell; the shell then fetches the fragment that holds the loaded state.
//! Every refresh goes through `Loading` again and re-runs the whole fetch.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{auth::CurrentUser, db::Quote, include_res};

use super::{card, repo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// Everyone's quotes, never deletable from here.
    Public,
    /// One user's quotes with the delete affordance.
    Owner(Uuid),
}

impl FeedKind {
    fn show_delete_button(&self) -> bool {
        matches!(self, FeedKind::Owner(_))
    }

    fn fragment_url(&self) -> &'static str {
        match self {
            FeedKind::Public => "/feed",
            FeedKind::Owner(_) => "/profile/feed",
        }
    }

    fn loading_text(&self) -> &'static str {
        match self {
            FeedKind::Public => "Loading quotes...",
            FeedKind::Owner(_) => "Loading your quotes...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Empty,
    Populated(Vec<Quote>),
}

impl FeedState {
    pub fn quote_count(&self) -> usize {
        match self {
            FeedState::Populated(quotes) => quotes.len(),
            _ => 0,
        }
    }
}

/// Fetches the whole feed in one call. A failed fetch is logged and shown as empty.
pub async fn load(db_pool: &SqlitePool, kind: FeedKind) -> FeedState {
    let fetched = match kind {
        FeedKind::Public => repo::list_all(db_pool).await,
        FeedKind::Owner(owner_id) => repo::list_by_owner(db_pool, owner_id).await,
    };

    match fetched {
        Ok(quotes) if quotes.is_empty() => FeedState::Empty,
        Ok(quotes) => FeedState::Populated(quotes),
        Err(e) => {
            tracing::error!(error = %e, ?kind, "error fetching quotes");
            FeedState::Empty
        }
    }
}

pub fn render(state: &FeedState, kind: FeedKind, viewer: Option<&CurrentUser>) -> String {
    match state {
        FeedState::Loading => include_res!(str, "/pages/feed_loading.html")
            .replace("{src}", kind.fragment_url())
            .replace("{text}", kind.loading_text()),
        FeedState::Empty => match (kind, viewer) {
            (FeedKind::Owner(_), _) => include_res!(str, "/pages/empty_owner.html").to_owned(),
            (FeedKind::Public, Some(_)) => {
                include_res!(str, "/pages/empty_public_user.html").to_owned()
            }
            (FeedKind::Public, None) => {
                include_res!(str, "/pages/empty_public_guest.html").to_owned()
            }
        },
        FeedState::Populated(quotes) => {
            let viewer_id = viewer.map(|user| user.id);
            let cards: String = quotes
                .iter()
                .map(|quote| card::render(quote, viewer_id, kind.show_delete_button()))
                .collect();
            include_res!(str, "/pages/feed.html").replace("{cards}", &cards)
        }
    }
}

/// Follows the count badge: "inspiring quote(s) shared".
pub fn count_line(count: usize) -> &'static str {
    if count == 1 {
        "inspiring quote shared"
    } else {
        "inspiring quotes shared"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_shell_points_at_fragment() {
        let html = render(&FeedState::Loading, FeedKind::Public, None);
        assert!(html.contains(r#"data-src="/feed""#));
        assert!(html.contains("Loading quotes..."));

        let html = render(&FeedState::Loading, FeedKind::Owner(Uuid::now_v7()), None);
        assert!(html.contains(r#"data-src="/profile/feed""#));
    }

    #[test]
    fn empty_call_to_action_depends_on_session() {
        let user = CurrentUser { id: Uuid::now_v7(), username: "Calm Sage".to_owned() };

        let guest = render(&FeedState::Empty, FeedKind::Public, None);
        assert!(guest.contains("Join to Share Quotes"));

        let member = render(&FeedState::Empty, FeedKind::Public, Some(&user));
        assert!(member.contains("Be the First to Share"));

        let owner = render(&FeedState::Empty, FeedKind::Owner(user.id), Some(&user));
        assert!(owner.contains("Share Your First Quote"));
    }

    #[test]
    fn count_line_pluralizes() {
        assert_eq!(count_line(0), "inspiring quotes shared");
        assert_eq!(count_line(1), "inspiring quote shared");
        assert_eq!(count_line(2), "inspiring quotes shared");
    }
}

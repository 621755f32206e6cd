use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use time::macros::format_description;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    auth::current_user,
    db::Quote,
    include_res,
    page::escape,
    session::{push_flash, Flash},
    AppResult, AppState,
};

use super::repo;

/// The delete affordance needs both the owner-feed flag and a viewer who owns the quote.
pub fn can_delete(show_delete_button: bool, viewer: Option<Uuid>, quote: &Quote) -> bool {
    show_delete_button && viewer == Some(quote.owner_id)
}

pub fn render(quote: &Quote, viewer: Option<Uuid>, show_delete_button: bool) -> String {
    let author = match &quote.author {
        Some(author) => format!(r#"<p class="quote-author">{}</p>"#, escape(author)),
        None => String::new(),
    };
    let delete = if can_delete(show_delete_button, viewer, quote) {
        include_res!(str, "/pages/quote_delete.html").replace("{id}", &quote.id.to_string())
    } else {
        String::new()
    };
    let created_at = quote
        .created_at
        .format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_default();

    include_res!(str, "/pages/quote_card.html")
        .replace("{id}", &quote.id.to_string())
        .replace("{content}", &escape(&quote.content))
        .replace("{author}", &author)
        .replace("{username}", &escape(&quote.owner_display_name))
        .replace("{created_at}", &created_at)
        .replace("{delete}", &delete)
}

/// Asks the store to delete the quote, then sends the owner back to their feed,
/// which fetches the list again.
#[debug_handler(state = AppState)]
pub(crate) async fn delete(
    Path(id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = current_user(&session).await? else {
        return Ok(Redirect::to("/auth").into_response());
    };

    match repo::delete_by_id(&db_pool, id, user.id).await {
        Ok(()) => push_flash(&session, Flash::success("Quote deleted successfully")).await?,
        Err(e) => {
            tracing::error!(error = %e, quote_id = %id, "failed to delete quote");
            push_flash(&session, Flash::error("Failed to delete quote")).await?;
        }
    }

    Ok(Redirect::to("/profile").into_response())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn quote(owner_id: Uuid) -> Quote {
        Quote {
            id: Uuid::now_v7(),
            content: "Simplicity is prerequisite for reliability.".to_owned(),
            author: None,
            owner_id,
            owner_display_name: "Jolly Owl".to_owned(),
            created_at: datetime!(2026-10-19 08:30 UTC),
        }
    }

    #[test]
    fn delete_needs_flag_and_ownership() {
        let owner = Uuid::now_v7();
        let other = Uuid::now_v7();
        let quote = quote(owner);

        assert!(can_delete(true, Some(owner), &quote));
        assert!(!can_delete(false, Some(owner), &quote));
        assert!(!can_delete(true, Some(other), &quote));
        assert!(!can_delete(true, None, &quote));
    }

    #[test]
    fn renders_card_fields() {
        let owner = Uuid::now_v7();
        let mut quote = quote(owner);
        quote.author = Some("Edsger <Dijkstra>".to_owned());

        let html = render(&quote, Some(owner), true);
        assert!(html.contains("Simplicity is prerequisite for reliability."));
        assert!(html.contains("Edsger &lt;Dijkstra&gt;"));
        assert!(html.contains("Jolly Owl"));
        assert!(html.contains("Oct 19, 2026"));
        assert!(html.contains(&format!(r#"action="/quotes/{}/delete""#, quote.id)));

        let html = render(&quote, Some(owner), false);
        assert!(!html.contains("/delete"));
    }

    #[test]
    fn missing_author_renders_nothing() {
        let html = render(&quote(Uuid::now_v7()), None, false);
        assert!(!html.contains("quote-author"));
    }
}

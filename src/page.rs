use axum::response::Html;
use tower_sessions::Session;

use crate::{auth::CurrentUser, include_res, session::{self, Flash}, AppResult};

/// Escapes text for use inside HTML element content and quoted attribute values.
/// Braces are escaped too so user text can never look like a template placeholder.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn navigation(user: Option<&CurrentUser>) -> String {
    match user {
        Some(user) => include_res!(str, "/pages/nav_user.html")
            .replace("{username}", &escape(&user.username)),
        None => include_res!(str, "/pages/nav_guest.html").to_owned(),
    }
}

pub fn flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="{}" role="status">{}</div>"#,
                flash.kind.class(),
                escape(&flash.message)
            )
        })
        .collect()
}

/// Wraps `body` in the page shell and drains pending notifications into it.
pub async fn render(
    session: &Session,
    user: Option<&CurrentUser>,
    title: &str,
    body: &str,
) -> AppResult<Html<String>> {
    let pending = session::take_flashes(session).await?;

    Ok(Html(
        include_res!(str, "/pages/layout.html")
            .replace("{title}", &escape(title))
            .replace("{nav}", &navigation(user))
            .replace("{flashes}", &flashes(&pending))
            .replace("{body}", body),
    ))
}

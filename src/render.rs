//! Plain-text and JSON rendering of a [`ListState`] for terminal hosts.

use crate::models::ArticleRecord;
use crate::state::ListState;
use std::io::{self, Write};

const DATE_FORMAT: &str = "%d %b %Y, %H:%M";

/// Write the list, or its empty-state message, one article per block.
///
/// Absent attributes are left out, so partial records still render.
pub fn render_list<W: Write>(out: &mut W, state: &ListState) -> io::Result<()> {
    match state {
        ListState::Loading => writeln!(out, "Loading…"),
        ListState::Empty(empty) => writeln!(out, "{empty}"),
        ListState::Loaded(articles) => {
            for (i, article) in articles.iter().enumerate() {
                render_article(out, i + 1, article)?;
            }
            Ok(())
        }
    }
}

/// Write the articles as a pretty-printed JSON array.
pub fn render_json<W: Write>(out: &mut W, articles: &[ArticleRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, articles)?;
    writeln!(out)
}

fn render_article<W: Write>(out: &mut W, number: usize, article: &ArticleRecord) -> io::Result<()> {
    let title = article.title.as_deref().unwrap_or_default();
    let section = article.section.as_deref().unwrap_or_default();
    let date = match article.published_at() {
        Some(ts) => ts.format(DATE_FORMAT).to_string(),
        None => article.published.clone().unwrap_or_default(),
    };

    writeln!(out, "{number:>3}. {title}")?;
    match (section.is_empty(), date.is_empty()) {
        (true, true) => {}
        (false, true) => writeln!(out, "     {section}")?,
        (true, false) => writeln!(out, "     {date}")?,
        (false, false) => writeln!(out, "     {section} | {date}")?,
    }
    if let Some(url) = &article.url {
        writeln!(out, "     {url}")?;
    }
    writeln!(out)
}

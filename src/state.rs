//! What a list view should show for one fetch cycle.

use crate::models::ArticleRecord;
use std::fmt;

/// Why the list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The pre-flight check failed; the pipeline was not run.
    NoConnectivity,
    /// The pipeline ran and produced nothing.
    NoResults,
}

impl EmptyState {
    /// Text for the empty-list placeholder.
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoConnectivity => "No internet connection.",
            EmptyState::NoResults => "No news found.",
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Display state of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<ArticleRecord>),
    Empty(EmptyState),
}

impl ListState {
    /// State after a fetch: an empty list means "no results".
    pub fn from_articles(articles: Vec<ArticleRecord>) -> Self {
        if articles.is_empty() {
            ListState::Empty(EmptyState::NoResults)
        } else {
            ListState::Loaded(articles)
        }
    }

    /// State shown when the connectivity check fails.
    pub fn offline() -> Self {
        ListState::Empty(EmptyState::NoConnectivity)
    }

    /// Records to list; empty unless [`ListState::Loaded`].
    pub fn articles(&self) -> &[ArticleRecord] {
        match self {
            ListState::Loaded(articles) => articles,
            _ => &[],
        }
    }
}

//! One search at a time, newest wins.
//!
//! A [`SearchSession`] runs each search on a tokio task so blocking network
//! I/O never sits on the caller's interactive loop. Submitting a new search
//! aborts the previous task and bumps a generation counter; any result that
//! still arrives for an older generation is dropped by [`SearchSession::next_update`].
//! Dropping the session aborts whatever is in flight.
//!
//! # Usage
//!
//! ```ignore
//! let mut session = SearchSession::new(NewsClient::new(NewsConfig::default())?);
//! session.submit(Some("android game".to_string()));
//! if let Some(update) = session.next_update().await {
//!     render(&update.articles);
//! }
//! ```

use crate::models::ArticleRecord;
use crate::pipeline::NewsClient;
use crate::transport::Transport;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// The complete result of one submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUpdate {
    /// Generation returned by the [`SearchSession::submit`] call that produced it.
    pub generation: u64,
    /// The phrase as submitted.
    pub query: Option<String>,
    pub articles: Vec<ArticleRecord>,
}

/// The search currently running for a session.
struct InFlight {
    handle: JoinHandle<()>,
    query: Option<String>,
}

/// Runs searches against a shared [`NewsClient`], one in flight at a time.
pub struct SearchSession<T> {
    client: Arc<NewsClient<T>>,
    generation: u64,
    in_flight: Option<InFlight>,
    tx: mpsc::UnboundedSender<SearchUpdate>,
    rx: mpsc::UnboundedReceiver<SearchUpdate>,
}

impl<T> SearchSession<T>
where
    T: Transport + 'static,
{
    /// Create a session that owns `client`. Nothing runs until [`SearchSession::submit`].
    pub fn new(client: NewsClient<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Start a search, superseding any search still running.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `query` - The raw search phrase; `None` or blank searches the default term
    ///
    /// # Returns
    ///
    /// The generation of the new search, as carried by its [`SearchUpdate`].
    pub fn submit(&mut self, query: Option<String>) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        info!(generation, query = ?query, "Submitting search");

        let task_query = query.clone();
        let handle = tokio::spawn(async move {
            let articles = client.search(task_query.as_deref()).await;
            // Receiver gone means the session was dropped; nothing to do.
            let _ = tx.send(SearchUpdate {
                generation,
                query: task_query,
                articles,
            });
        });
        self.in_flight = Some(InFlight { handle, query });
        generation
    }

    /// Wait for the result of the latest submission.
    ///
    /// Results of superseded searches are discarded. A search task that
    /// panics still produces exactly one update, with no articles.
    ///
    /// # Returns
    ///
    /// `None` only if nothing is in flight (never submitted, already
    /// delivered, or cancelled).
    pub async fn next_update(&mut self) -> Option<SearchUpdate> {
        loop {
            let in_flight = self.in_flight.as_mut()?;

            tokio::select! {
                biased;
                update = self.rx.recv() => {
                    let update = update?;
                    if update.generation == self.generation {
                        self.in_flight = None;
                        return Some(update);
                    }
                    debug!(
                        stale = update.generation,
                        current = self.generation,
                        "Discarding stale search result"
                    );
                }
                joined = &mut in_flight.handle => {
                    let query = self.in_flight.take().and_then(|f| f.query);
                    match joined {
                        // The task sends before it returns, so its update is queued.
                        Ok(()) => return self.take_queued(),
                        Err(e) if e.is_panic() => {
                            error!(generation = self.generation, error = %e, "Search task panicked");
                            return Some(SearchUpdate {
                                generation: self.generation,
                                query,
                                articles: Vec::new(),
                            });
                        }
                        Err(e) => {
                            debug!(generation = self.generation, error = %e, "Search task cancelled");
                            return None;
                        }
                    }
                }
            }
        }
    }

    /// Pull the current generation's update out of the channel, dropping stale ones.
    fn take_queued(&mut self) -> Option<SearchUpdate> {
        while let Ok(update) = self.rx.try_recv() {
            if update.generation == self.generation {
                return Some(update);
            }
        }
        None
    }

    /// Stop caring about the in-flight search, if any.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.handle.is_finished() {
                debug!(generation = self.generation, "Aborting in-flight search");
            }
            in_flight.handle.abort();
        }
    }

    /// True while the latest submission has not been delivered yet.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation of the latest submission, `0` before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T> Drop for SearchSession<T> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

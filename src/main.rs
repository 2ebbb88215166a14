//! # Guardian News shell
//!
//! Terminal host for the `guardian_news` library. It plays the part of the
//! list UI: checks connectivity, runs a search, and prints either the
//! articles or an empty-state message.
//!
//! ## Usage
//!
//! ```sh
//! guardian_news android game
//! guardian_news --interactive
//! ```
//!
//! In interactive mode every line is a new search, except `open <n>`, which
//! opens article `n` of the last list in the default browser.
//!
//! Logs go to stderr (`RUST_LOG` controls the level); results go to stdout.

use clap::Parser;
use guardian_news::connectivity::{AssumeConnected, ConnectivityProbe, TcpProbe, ensure_connected};
use guardian_news::render::{render_json, render_list};
use guardian_news::state::ListState;
use guardian_news::transport::Transport;
use guardian_news::{ArticleRecord, NewsClient, SearchSession, SearchUpdate};
use std::error::Error;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod browser;
mod cli;

use cli::{Cli, ShellCommand};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.query, %args.base_url, json = args.json, interactive = args.interactive, "Parsed CLI arguments");

    let config = args.config();
    let probe: Box<dyn ConnectivityProbe> = if args.skip_connectivity_check {
        Box::new(AssumeConnected(true))
    } else {
        Box::new(TcpProbe::for_url(&config.base_url)?)
    };
    let client = NewsClient::new(config)?;

    if args.interactive {
        run_interactive(client, probe.as_ref(), args.json).await?;
    } else {
        run_once(&client, probe.as_ref(), args.query(), args.json).await?;
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// One search, one rendered list.
#[instrument(level = "info", skip_all, fields(query = ?query))]
async fn run_once<T: Transport>(
    client: &NewsClient<T>,
    probe: &dyn ConnectivityProbe,
    query: Option<String>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if let Err(e) = ensure_connected(probe).await {
        warn!(error = %e, "Skipping search");
        return show(&ListState::offline(), json);
    }

    render_list(&mut io::stderr(), &ListState::Loading)?;
    let articles = client.search(query.as_deref()).await;
    show(&ListState::from_articles(articles), json)
}

/// Each stdin line starts a new search or opens a listed article; a result
/// for an older search is never shown.
async fn run_interactive<T: Transport + 'static>(
    client: NewsClient<T>,
    probe: &dyn ConnectivityProbe,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut session = SearchSession::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut shown: Vec<ArticleRecord> = Vec::new();

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match ShellCommand::parse(&line) {
                    ShellCommand::Open(number) => open_article(&shown, number).await,
                    ShellCommand::Search(phrase) => match ensure_connected(probe).await {
                        Ok(()) => {
                            session.submit(Some(phrase));
                            render_list(&mut io::stderr(), &ListState::Loading)?;
                        }
                        Err(e) => {
                            warn!(error = %e, "Skipping search");
                            session.cancel();
                            shown.clear();
                            show(&ListState::offline(), json)?;
                        }
                    },
                },
                None => stdin_open = false,
            },
            update = session.next_update(), if session.is_loading() => {
                if let Some(SearchUpdate { articles, .. }) = update {
                    let state = ListState::from_articles(articles);
                    show(&state, json)?;
                    shown = state.articles().to_vec();
                }
            }
            else => break,
        }
    }
    Ok(())
}

/// Open the `number`th article of the last rendered list (1-based).
async fn open_article(shown: &[ArticleRecord], number: usize) {
    let url = match browser::link_for(shown, number) {
        Ok(url) => url,
        Err(message) => {
            eprintln!("{message}");
            return;
        }
    };
    if let Err(e) = browser::open_url(url).await {
        warn!(%url, error = %e, "Could not open article");
        eprintln!("Could not open {url}: {e}");
    }
}

fn show(state: &ListState, json: bool) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        // keep stdout parseable; the reason for an empty array goes to stderr
        if let ListState::Empty(empty) = state {
            eprintln!("{empty}");
        }
        render_json(&mut out, state.articles())?;
    } else {
        render_list(&mut out, state)?;
    }
    out.flush()?;
    Ok(())
}

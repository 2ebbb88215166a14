//! Command-line interface definitions for the Guardian News shell.
//!
//! All endpoint options can be provided via flags or environment variables.

use clap::Parser;
use guardian_news::NewsConfig;
use guardian_news::config::DEFAULT_BASE_URL;

/// Search The Guardian and list matching articles.
///
/// # Examples
///
/// ```sh
/// # Default search term
/// guardian_news
///
/// # Search phrase, with an API key from the environment
/// GUARDIAN_API_KEY=... guardian_news android game
///
/// # Read one search per line from stdin; `open 2` opens the second result
/// guardian_news --interactive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search phrase (words are joined with `+`); empty searches the default term
    pub query: Vec<String>,

    /// Guardian content API key
    #[arg(long, env = "GUARDIAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search endpoint, including the trailing `?`
    #[arg(long, env = "GUARDIAN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Print results as JSON instead of a list
    #[arg(short, long)]
    pub json: bool,

    /// Read search phrases from stdin, one per line
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip the pre-flight connectivity check
    #[arg(long)]
    pub skip_connectivity_check: bool,
}

/// One line typed in `--interactive` mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Start a new search for the phrase (blank searches the default term).
    Search(String),
    /// Open the article with this 1-based list number in the browser.
    Open(usize),
}

impl ShellCommand {
    /// Interpret a stdin line: `open <n>` opens article `n`, anything else is a search.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        if let (Some(cmd), Some(n), None) = (words.next(), words.next(), words.next()) {
            if cmd.eq_ignore_ascii_case("open") {
                if let Ok(n) = n.parse() {
                    return ShellCommand::Open(n);
                }
            }
        }
        ShellCommand::Search(line.to_string())
    }
}

impl Cli {
    /// Positional words as one phrase, `None` when there are none.
    pub fn query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }

    /// Endpoint configuration from `--base-url` and `--api-key`.
    pub fn config(&self) -> NewsConfig {
        NewsConfig::with_base_url(self.base_url.clone()).api_key(self.api_key.clone())
    }
}

//! Hands an article URL to the desktop's default browser.
//!
//! Only absolute `http`/`https` URLs are passed on. The URL is given to the
//! platform opener as a single argument, never through a shell.

use guardian_news::ArticleRecord;
use std::io;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, instrument, warn};
use url::Url;

/// How long the opener may take to hand off to the browser.
const OPENER_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(target_os = "macos")]
const OPENER: (&str, &[&str]) = ("open", &[]);

#[cfg(target_os = "windows")]
const OPENER: (&str, &[&str]) = ("rundll32", &["url.dll,FileProtocolHandler"]);

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: (&str, &[&str]) = ("xdg-open", &[]);

/// Link of the `number`th (1-based) article in a rendered list.
///
/// # Returns
///
/// The article's `webUrl`, or a message for the user when the number is out
/// of range or the article came without a link.
pub fn link_for(articles: &[ArticleRecord], number: usize) -> Result<&str, String> {
    let article = number
        .checked_sub(1)
        .and_then(|i| articles.get(i))
        .ok_or_else(|| format!("No article {number} in the current list."))?;
    article
        .url
        .as_deref()
        .ok_or_else(|| format!("Article {number} has no link."))
}

/// Program and arguments that would open `url`.
///
/// # Arguments
///
/// * `url` - The article link, as decoded from `webUrl`
///
/// # Returns
///
/// The opener invocation, or `InvalidInput` when the link is not an absolute
/// web URL.
pub fn launch_command(url: &str) -> io::Result<(&'static str, Vec<String>)> {
    let parsed = Url::parse(url)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to open non-web URL {url:?}"),
        ));
    }

    let (program, fixed) = OPENER;
    let mut args: Vec<String> = fixed.iter().map(|a| a.to_string()).collect();
    args.push(parsed.to_string());
    Ok((program, args))
}

/// Open `url` in the default browser and wait for the opener to exit.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn open_url(url: &str) -> io::Result<()> {
    let (program, args) = launch_command(url)?;

    let status = tokio::time::timeout(
        OPENER_TIMEOUT,
        Command::new(program)
            .args(&args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status(),
    )
    .await
    .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, format!("{program} did not exit")))??;

    if status.success() {
        info!(program, "Opened article in browser");
        Ok(())
    } else {
        warn!(program, code = ?status.code(), "Browser opener failed");
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

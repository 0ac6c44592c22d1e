//! Member roster extraction
//!
//! Pages through `memberlist.php` and pulls one text field out of every
//! member row. Unlike the forum traversal, each roster page gets a single
//! attempt: a failed page is logged and the walk moves on to the next one.

use crate::crawler::fetcher::{FetchResult, Fetcher, Transport};
use crate::crawler::parser::parse_roster;
use crate::output::ArchiveStats;
use crate::storage::Storage;
use crate::url::memberlist_url;
use crate::{ArchiveError, Result};
use std::path::PathBuf;
use url::Url;

/// Settings for one roster walk
#[derive(Debug, Clone)]
pub struct RosterOptions {
    /// First page to extract (1-based)
    pub start_page: u32,
    /// Members listed per roster page
    pub per_page: u32,
    /// Append extracted text here when set
    pub store_path: Option<PathBuf>,
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            per_page: 25,
            store_path: None,
        }
    }
}

/// Member offset of a 1-based roster page
///
/// # Examples
///
/// ```
/// use phpbb_archiver::crawler::roster_offset;
///
/// assert_eq!(roster_offset(1, 25), 0);
/// assert_eq!(roster_offset(10, 25), 225);
/// ```
pub fn roster_offset(page: u32, per_page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// Walks the roster from `options.start_page` to the last page
///
/// The first roster page (`start=0`) is fetched to learn the page count;
/// if it cannot be fetched the walk is aborted. A missing page count is
/// treated as a single page.
pub async fn extract_roster<T: Transport, S: Storage>(
    fetcher: &Fetcher<T>,
    storage: &mut S,
    base: &Url,
    options: &RosterOptions,
    stats: &mut ArchiveStats,
) -> Result<()> {
    let first_url = memberlist_url(base, 0)?;
    let Some(first) = fetcher.fetch_once(&first_url).await.into_page() else {
        return Err(ArchiveError::RosterUnavailable {
            url: first_url.to_string(),
        });
    };

    let total_pages = parse_roster(&first).total_pages.unwrap_or_else(|| {
        tracing::warn!("No pagination summary on {}; assuming a single page", first_url);
        1
    });
    tracing::info!("Roster has {} pages", total_pages);

    if options.start_page > total_pages {
        tracing::warn!(
            "Start page {} is past the last roster page {}",
            options.start_page,
            total_pages
        );
    }

    for page in options.start_page..=total_pages {
        let page_url = memberlist_url(base, roster_offset(page, options.per_page))?;

        let html = match fetcher.fetch_once(&page_url).await {
            FetchResult::Page(html) => html,
            other => {
                tracing::warn!("Failed to fetch roster page {} ({}): {:?}", page, page_url, other);
                stats.unavailable += 1;
                continue;
            }
        };

        let entries = parse_roster(&html).entries;
        println!("Page {} Extracted Texts: {:?}", page, entries);

        stats.roster_pages += 1;
        stats.roster_entries += entries.len() as u64;

        if let Some(path) = &options.store_path {
            storage.append_lines(path, &entries)?;
        }
    }

    Ok(())
}

//! Crawler module for board traversal
//!
//! This module contains the core archiving logic, including:
//! - HTTP fetching with transport retry
//! - Structural extraction of forum, topic and pagination links
//! - Depth-first forum traversal with per-run deduplication
//! - Member roster extraction

mod coordinator;
mod fetcher;
#[cfg(test)]
mod mock;
mod parser;
mod roster;

pub use coordinator::Archiver;
pub use fetcher::{
    build_headers, build_http_client, FetchResult, Fetcher, HttpTransport, RawResponse,
    RetryPolicy, Transport, TransportError,
};
pub use parser::{parse_listing, parse_roster, ForumLink, ListingPage, RosterPage, TopicLink};
pub use roster::{extract_roster, roster_offset, RosterOptions};

pub use crate::state::CrawlTarget;

use crate::config::{Config, ForumProfile};
use crate::url::parse_base;
use crate::ArchiveError;

/// Builds a fetcher over the proxied HTTP client for one board profile
///
/// # Arguments
///
/// * `config` - The archiver configuration (network and session settings)
/// * `forum` - The board being archived; its root is sent as the referer
pub fn http_fetcher(
    config: &Config,
    forum: &ForumProfile,
) -> Result<Fetcher<HttpTransport>, ArchiveError> {
    let base = parse_base(&forum.base_url)?;
    let headers = build_headers(&config.network, &config.session, &base)?;
    let client = build_http_client(&config.network, headers)?;

    Ok(Fetcher::new(
        HttpTransport::new(client),
        RetryPolicy::from_config(&config.network),
    ))
}

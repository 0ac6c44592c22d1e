//! Archive coordinator - forum traversal logic
//!
//! This module contains the traversal that mirrors a board to disk:
//! - Saving the landing page and walking its top-level forums
//! - Applying the ignore/only settings to top-level forums
//! - Archiving every topic of a subforum, page by page
//! - Descending into nested subforums depth-first, in document order
//! - Deduplicating forums, subforums and topics within the run

use crate::crawler::fetcher::{Fetcher, Transport};
use crate::crawler::parser::{parse_listing, ForumLink, TopicLink};
use crate::output::ArchiveStats;
use crate::state::{CrawlTarget, Frame, VisitedSets, WorkStack};
use crate::storage::{topic_path, Storage, INDEX_FILE};
use crate::url::{forum_id, sanitize_dirname, sanitize_filename, viewforum_url, ForumFilter};
use crate::{ArchiveError, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// One archive run over a board
///
/// Owns the dedup state for the run; a new `Archiver` starts with empty
/// visited sets.
pub struct Archiver<T, S> {
    fetcher: Fetcher<T>,
    storage: S,
    archive_dir: PathBuf,
    filter: ForumFilter,
    single_forum: bool,
    visited: VisitedSets,
    stats: ArchiveStats,
}

impl<T: Transport, S: Storage> Archiver<T, S> {
    /// Creates an archiver writing below `archive_dir`
    pub fn new(fetcher: Fetcher<T>, storage: S, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            storage,
            archive_dir: archive_dir.into(),
            filter: ForumFilter::default(),
            single_forum: false,
            visited: VisitedSets::new(),
            stats: ArchiveStats::new(),
        }
    }

    /// Sets the ignore/only settings applied to top-level forums
    pub fn with_filter(mut self, filter: ForumFilter) -> Self {
        self.filter = filter;
        self
    }

    /// When set, nested subforums are not descended into
    pub fn with_single_forum(mut self, single_forum: bool) -> Self {
        self.single_forum = single_forum;
        self
    }

    pub fn visited(&self) -> &VisitedSets {
        &self.visited
    }

    pub fn stats(&self) -> &ArchiveStats {
        &self.stats
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stamps the finish time and hands back the run statistics
    pub fn finish(mut self) -> ArchiveStats {
        self.stats.finish();
        self.stats
    }

    /// Archives a whole board starting from its landing page
    ///
    /// The landing page is saved as `index.html` in the archive root, then
    /// each top-level forum link is checked against the visited set and the
    /// filter before its subforum tree is archived.
    ///
    /// # Errors
    ///
    /// * `LandingPageUnavailable` - the landing page could not be fetched;
    ///   nothing else is attempted
    /// * `Storage` - a page could not be written
    pub async fn archive_forum(&mut self, base_url: &Url) -> Result<()> {
        tracing::info!("Fetching the main forum page: {}", base_url);

        let Some(landing) = self.fetcher.fetch(base_url).await.into_page() else {
            tracing::error!("Failed to fetch the main page");
            return Err(ArchiveError::LandingPageUnavailable {
                url: base_url.to_string(),
            });
        };

        tracing::info!("Saving the main forum page");
        self.storage
            .save_page(&self.archive_dir.join(INDEX_FILE), &landing)?;

        let listing = parse_listing(&landing, base_url);
        tracing::info!("Found {} forum links on the main page", listing.forums.len());

        for forum in listing.forums {
            let id = match forum.id() {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Skipping forum link without usable ID: {}", e);
                    continue;
                }
            };

            if !self.visited.mark_forum(id) {
                tracing::debug!("Skipping forum ID {} because it's already been archived", id);
                self.stats.duplicates_skipped += 1;
                continue;
            }

            let decision = self.filter.classify(id);
            if !decision.should_archive() {
                tracing::info!("Skipping forum ID {} ({:?})", id, decision);
                self.stats.forums_filtered += 1;
                continue;
            }

            let directory = forum_directory(&self.archive_dir, &forum);
            self.archive_subforum(CrawlTarget::new(forum.url, directory))
                .await?;
        }

        Ok(())
    }

    /// Archives one forum without visiting the landing page
    ///
    /// Enters `viewforum.php?f=<id>&sid=<session>` directly and writes into
    /// `<archive_dir>/Forum_<id>`.
    pub async fn archive_direct(&mut self, base: &Url, id: u32, session_id: &str) -> Result<()> {
        let url = viewforum_url(base, id, session_id)?;
        let directory = self.archive_dir.join(format!("Forum_{}", id));
        self.archive_subforum(CrawlTarget::new(url, directory)).await
    }

    /// Archives a subforum, its pagination and (unless single-forum mode is
    /// set) every nested subforum below it
    ///
    /// A subforum already entered during this run is a no-op.
    pub async fn archive_subforum(&mut self, target: CrawlTarget) -> Result<()> {
        let mut stack = WorkStack::with_target(target);

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(target) => self.enter(target, &mut stack).await?,
                Frame::NextPage {
                    target,
                    next,
                    untitled,
                } => self.follow(target, next, untitled, &mut stack).await?,
            }
        }

        Ok(())
    }

    async fn enter(&mut self, target: CrawlTarget, stack: &mut WorkStack) -> Result<()> {
        let id = match forum_id(&target.url) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Skipping subforum without usable ID: {}", e);
                return Ok(());
            }
        };

        if !self.visited.mark_subforum(id) {
            tracing::debug!("Skipping subforum ID {} because it's already been archived", id);
            self.stats.duplicates_skipped += 1;
            return Ok(());
        }

        tracing::info!("Processing subforum: {}", target.url);
        self.stats.forums_entered += 1;

        let page_url = target.url.clone();
        self.follow(target, page_url, 1, stack).await
    }

    /// Fetches one listing page of `target` and processes it
    async fn follow(
        &mut self,
        target: CrawlTarget,
        page_url: Url,
        untitled: u32,
        stack: &mut WorkStack,
    ) -> Result<()> {
        if !self.visited.mark_listing(&page_url) {
            tracing::warn!(
                "Listing page {} was already fetched; stopping pagination of {}",
                page_url,
                target.url
            );
            return Ok(());
        }

        let Some(html) = self.fetcher.fetch(&page_url).await.into_page() else {
            self.stats.unavailable += 1;
            return Ok(());
        };
        self.stats.listing_pages += 1;

        let listing = parse_listing(&html, &page_url);

        let mut untitled = untitled;
        for topic in &listing.topics {
            untitled = self.archive_topic(topic, &target.directory, untitled).await?;
        }

        // Pushed first so nested subforums found on this page pop before it.
        if let Some(next) = listing.next_page {
            stack.push(Frame::NextPage {
                target: target.clone(),
                next,
                untitled,
            });
        }

        if !self.single_forum {
            let nested = listing
                .forums
                .into_iter()
                .map(|forum| {
                    let directory = forum_directory(&target.directory, &forum);
                    CrawlTarget::new(forum.url, directory)
                })
                .collect();
            stack.push_nested(nested);
        }

        Ok(())
    }

    /// Archives one topic page; returns the next untitled counter value
    async fn archive_topic(
        &mut self,
        topic: &TopicLink,
        directory: &Path,
        untitled: u32,
    ) -> Result<u32> {
        let id = match topic.id() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Skipping topic link without usable ID: {}", e);
                return Ok(untitled);
            }
        };

        if !self.visited.mark_topic(id) {
            tracing::debug!("Skipping topic ID {} because it's already been archived", id);
            self.stats.duplicates_skipped += 1;
            return Ok(untitled);
        }

        let mut next_untitled = untitled;
        let mut name = sanitize_filename(&topic.title);
        if name.is_empty() {
            name = untitled.to_string();
            next_untitled += 1;
        }

        tracing::info!("Fetching post page: {}", topic.url);
        match self.fetcher.fetch(&topic.url).await.into_page() {
            Some(page) => {
                let path = topic_path(directory, &name);
                tracing::info!("Saving post page: {}", path.display());
                self.storage.save_page(&path, &page)?;
                self.stats.topics_saved += 1;
            }
            None => self.stats.unavailable += 1,
        }

        Ok(next_untitled)
    }
}

/// Directory a forum is archived into below `parent`
///
/// A title with no usable name (empty, or only dots) archives into `parent`.
fn forum_directory(parent: &Path, forum: &ForumLink) -> PathBuf {
    let name = sanitize_dirname(&forum.title);
    if name.is_empty() {
        tracing::warn!(
            "Forum {} has no usable name; archiving into {}",
            forum.url,
            parent.display()
        );
        return parent.to_path_buf();
    }
    parent.join(name)
}

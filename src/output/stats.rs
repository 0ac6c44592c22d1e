//! Run statistics
//!
//! Counters collected while a run progresses, printed as a summary when it
//! finishes.

use chrono::{DateTime, Utc};

/// Archive run statistics summary
#[derive(Debug, Clone)]
pub struct ArchiveStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Subforum listings entered
    pub forums_entered: u64,

    /// Listing pages fetched, pagination included
    pub listing_pages: u64,

    /// Topic pages written to the archive
    pub topics_saved: u64,

    /// Forum, subforum and topic links skipped as already visited
    pub duplicates_skipped: u64,

    /// Top-level forums skipped by the ignore/only settings
    pub forums_filtered: u64,

    /// Resources whose fetch came back unavailable
    pub unavailable: u64,

    /// Roster pages processed
    pub roster_pages: u64,

    /// Roster text fields extracted
    pub roster_entries: u64,
}

impl ArchiveStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            forums_entered: 0,
            listing_pages: 0,
            topics_saved: 0,
            duplicates_skipped: 0,
            forums_filtered: 0,
            unavailable: 0,
            roster_pages: 0,
            roster_entries: 0,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

impl Default for ArchiveStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ArchiveStats) {
    println!("=== Archive Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    if stats.forums_entered > 0 || stats.listing_pages > 0 {
        println!("Forums:");
        println!("  Forums entered: {}", stats.forums_entered);
        println!("  Listing pages fetched: {}", stats.listing_pages);
        println!("  Skipped by filter: {}", stats.forums_filtered);
        println!();

        println!("Topics:");
        println!("  Saved: {}", stats.topics_saved);
        println!("  Duplicates skipped: {}", stats.duplicates_skipped);
        println!();
    }

    if stats.roster_pages > 0 {
        println!("Roster:");
        println!("  Pages processed: {}", stats.roster_pages);
        println!("  Entries extracted: {}", stats.roster_entries);
        println!();
    }

    println!("Unavailable resources: {}", stats.unavailable);

    tracing::info!(
        "Run finished: {} topics saved, {} roster entries, {} unavailable",
        stats.topics_saved,
        stats.roster_entries,
        stats.unavailable
    );
}

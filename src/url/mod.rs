//! Forum addressing for the archiver
//!
//! This module provides link resolution, query-parameter ID extraction,
//! filename sanitization, and the ignore/only classification of forums.

mod ids;
mod resolve;
mod sanitize;

use std::collections::BTreeSet;

// Re-export main functions
pub use ids::{forum_id, query_id, topic_id, FORUM_PARAM, TOPIC_PARAM};
pub use resolve::{memberlist_url, parse_base, resolve_link, viewforum_url};
pub use sanitize::{sanitize_dirname, sanitize_filename};

/// Outcome of checking a top-level forum against the ignore settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForumDecision {
    /// Forum should be archived
    Archive,
    /// Forum is on the board profile's permanent ignore list
    ProfileIgnored,
    /// Only-mode is active and this is not the selected forum
    NotSelected,
    /// Forum is on the operator's ignore list
    Ignored,
}

impl ForumDecision {
    /// Returns true if the forum should be archived
    pub fn should_archive(&self) -> bool {
        matches!(self, Self::Archive)
    }
}

/// Ignore and only-this-forum settings, fixed for the whole run
#[derive(Debug, Clone, Default)]
pub struct ForumFilter {
    /// Board profile defaults; applied in every mode
    pub profile_ignores: BTreeSet<u32>,
    /// Operator-supplied ignore list; suspended while `only` is set
    pub ignores: BTreeSet<u32>,
    /// Restrict the run to a single forum ID
    pub only: Option<u32>,
}

impl ForumFilter {
    pub fn new(
        profile_ignores: impl IntoIterator<Item = u32>,
        ignores: impl IntoIterator<Item = u32>,
        only: Option<u32>,
    ) -> Self {
        Self {
            profile_ignores: profile_ignores.into_iter().collect(),
            ignores: ignores.into_iter().collect(),
            only,
        }
    }

    /// Classifies a top-level forum ID
    ///
    /// Checks are made in the following priority order:
    /// 1. Profile ignore list
    /// 2. Only-mode selection
    /// 3. Operator ignore list (skipped entirely in only-mode)
    /// 4. Archive (default)
    ///
    /// # Examples
    ///
    /// ```
    /// use phpbb_archiver::url::{ForumDecision, ForumFilter};
    ///
    /// let filter = ForumFilter::new([], [5], Some(5));
    /// assert_eq!(filter.classify(5), ForumDecision::Archive);
    /// assert_eq!(filter.classify(6), ForumDecision::NotSelected);
    /// ```
    pub fn classify(&self, forum_id: u32) -> ForumDecision {
        if self.profile_ignores.contains(&forum_id) {
            return ForumDecision::ProfileIgnored;
        }

        match self.only {
            Some(only) if only != forum_id => ForumDecision::NotSelected,
            Some(_) => ForumDecision::Archive,
            None if self.ignores.contains(&forum_id) => ForumDecision::Ignored,
            None => ForumDecision::Archive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_by_default() {
        let filter = ForumFilter::default();
        assert_eq!(filter.classify(1), ForumDecision::Archive);
        assert!(filter.classify(1).should_archive());
    }

    #[test]
    fn test_operator_ignore() {
        let filter = ForumFilter::new([], [3, 4], None);
        assert_eq!(filter.classify(3), ForumDecision::Ignored);
        assert_eq!(filter.classify(5), ForumDecision::Archive);
    }

    #[test]
    fn test_only_overrides_operator_ignore() {
        let filter = ForumFilter::new([], [5], Some(5));
        assert_eq!(filter.classify(5), ForumDecision::Archive);
    }

    #[test]
    fn test_only_suspends_other_ignores() {
        let filter = ForumFilter::new([], [5, 6], Some(5));
        assert_eq!(filter.classify(6), ForumDecision::NotSelected);
        assert_eq!(filter.classify(7), ForumDecision::NotSelected);
    }

    #[test]
    fn test_profile_ignore_wins_over_only() {
        let filter = ForumFilter::new([5], [], Some(5));
        assert_eq!(filter.classify(5), ForumDecision::ProfileIgnored);
    }

    #[test]
    fn test_profile_ignore_without_only() {
        let filter = ForumFilter::new([9], [], None);
        assert_eq!(filter.classify(9), ForumDecision::ProfileIgnored);
        assert!(!filter.classify(9).should_archive());
    }
}

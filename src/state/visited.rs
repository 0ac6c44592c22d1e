use std::collections::HashSet;
use url::Url;

/// IDs already claimed during the current run
///
/// Top-level forums (seen on the landing page), subforums (entered for
/// listing) and topics are tracked separately, since a forum ID is first
/// claimed from the index and then again when its listing is entered.
/// Listing page URLs are kept too, so a pagination cycle ends.
/// Nothing here is persisted; a new run starts empty.
#[derive(Debug, Clone, Default)]
pub struct VisitedSets {
    forums: HashSet<u32>,
    subforums: HashSet<u32>,
    topics: HashSet<u32>,
    /// Listing page URLs fetched, pagination included
    listings: HashSet<Url>,
}

impl VisitedSets {
    /// Creates empty sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a landing-page forum ID; false if it was already claimed
    pub fn mark_forum(&mut self, id: u32) -> bool {
        self.forums.insert(id)
    }

    /// Claims a subforum ID before its listing is fetched
    pub fn mark_subforum(&mut self, id: u32) -> bool {
        self.subforums.insert(id)
    }

    /// Claims a topic ID before its page is fetched
    pub fn mark_topic(&mut self, id: u32) -> bool {
        self.topics.insert(id)
    }

    /// Claims a listing page URL before it is fetched; false on a repeat,
    /// such as a `next` link pointing back at an earlier page
    pub fn mark_listing(&mut self, url: &Url) -> bool {
        self.listings.insert(url.clone())
    }

    pub fn has_forum(&self, id: u32) -> bool {
        self.forums.contains(&id)
    }

    pub fn has_subforum(&self, id: u32) -> bool {
        self.subforums.contains(&id)
    }

    pub fn has_topic(&self, id: u32) -> bool {
        self.topics.contains(&id)
    }

    pub fn forum_count(&self) -> usize {
        self.forums.len()
    }

    pub fn subforum_count(&self) -> usize {
        self.subforums.len()
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn listing_count(&self) -> usize {
        self.listings.len()
    }
}

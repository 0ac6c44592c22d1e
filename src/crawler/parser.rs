//! HTML extraction for phpBB listing and roster pages
//!
//! This module pulls the structural links the traversal needs out of a
//! rendered page:
//! - Topic anchors (`a.topictitle`)
//! - Forum anchors (`a.forumtitle`)
//! - The pagination "next" anchor (`a[rel~=next]`)
//! - Roster page count and per-member text
//!
//! Extraction never fails. When the board template lacks an expected
//! element the result is simply empty, which the caller reads as
//! "nothing found here".

use crate::url::{forum_id, resolve_link, topic_id};
use crate::UrlResult;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A forum anchor found on a listing or landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumLink {
    /// Absolute forum URL
    pub url: Url,
    /// Anchor text, trimmed
    pub title: String,
}

impl ForumLink {
    pub fn id(&self) -> UrlResult<u32> {
        forum_id(&self.url)
    }
}

/// A topic anchor found on a forum listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicLink {
    /// Absolute topic URL
    pub url: Url,
    /// Anchor text, trimmed
    pub title: String,
}

impl TopicLink {
    pub fn id(&self) -> UrlResult<u32> {
        topic_id(&self.url)
    }
}

/// Everything the traversal needs from one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Topics in document order
    pub topics: Vec<TopicLink>,
    /// Forum (or nested subforum) links in document order
    pub forums: Vec<ForumLink>,
    /// Next pagination page, if any
    pub next_page: Option<Url>,
}

/// Extracted information from one member roster page
#[derive(Debug, Clone, Default)]
pub struct RosterPage {
    /// Total roster pages, from the pagination summary
    pub total_pages: Option<u32>,
    /// One text field per member row
    pub entries: Vec<String>,
}

/// Parses a forum listing (or the landing page)
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the page was fetched from, for resolving relative links
///
/// # Example
///
/// ```
/// use phpbb_archiver::crawler::parse_listing;
/// use url::Url;
///
/// let html = r#"<a class="topictitle" href="./viewtopic.php?t=9">Hello</a>
///               <a rel="next" href="./viewforum.php?f=2&amp;start=25">Next</a>"#;
/// let page = Url::parse("http://board.example/viewforum.php?f=2").unwrap();
/// let listing = parse_listing(html, &page);
/// assert_eq!(listing.topics[0].title, "Hello");
/// assert_eq!(
///     listing.next_page.unwrap().as_str(),
///     "http://board.example/viewforum.php?f=2&start=25"
/// );
/// ```
pub fn parse_listing(html: &str, page_url: &Url) -> ListingPage {
    let document = Html::parse_document(html);

    let topics = extract_anchors(&document, "a.topictitle", page_url)
        .into_iter()
        .map(|(url, title)| TopicLink { url, title })
        .collect();

    let forums = extract_anchors(&document, "a.forumtitle", page_url)
        .into_iter()
        .map(|(url, title)| ForumLink { url, title })
        .collect();

    let next_page = extract_next_page(&document, page_url);

    ListingPage {
        topics,
        forums,
        next_page,
    }
}

/// Parses a member roster page
pub fn parse_roster(html: &str) -> RosterPage {
    let document = Html::parse_document(html);

    RosterPage {
        total_pages: extract_total_pages(&document),
        entries: extract_roster_entries(&document),
    }
}

/// Collects `(absolute url, trimmed text)` for every anchor matching `selector`
fn extract_anchors(document: &Html, selector: &str, page_url: &Url) -> Vec<(Url, String)> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let url = resolve_link(href, page_url)?;
            Some((url, element_text(&element)))
        })
        .collect()
}

/// First anchor whose `rel` list contains `next`
fn extract_next_page(document: &Html, page_url: &Url) -> Option<Url> {
    let selector = Selector::parse(r#"a[rel~="next"]"#).ok()?;
    let element = document.select(&selector).next()?;
    let href = element.value().attr("href")?;
    resolve_link(href, page_url)
}

/// Reads the trailing integer of the pagination summary ("Page 1 of 10")
fn extract_total_pages(document: &Html) -> Option<u32> {
    let pagination = Selector::parse("div.pagination").ok()?;
    let summary = Selector::parse("span.sr-only").ok()?;

    let text = document
        .select(&pagination)
        .next()?
        .select(&summary)
        .next()
        .map(|element| element_text(&element))?;

    text.rsplit("of").next()?.trim().parse().ok()
}

/// Text of the first `div` inside each `td.info` cell
fn extract_roster_entries(document: &Html) -> Vec<String> {
    let (Ok(cell), Ok(div)) = (Selector::parse("td.info"), Selector::parse("div")) else {
        return Vec::new();
    };

    document
        .select(&cell)
        .filter_map(|td| td.select(&div).next())
        .map(|element| element_text(&element))
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

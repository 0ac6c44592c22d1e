use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves an href found on `page` to an absolute URL
///
/// phpBB emits relative links such as `./viewforum.php?f=2&amp;sid=...`;
/// these resolve against the directory of the page they appear on.
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - anything that does not resolve to HTTP(S)
pub fn resolve_link(href: &str, page: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match page.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

/// Parses a configured board root
pub fn parse_base(base_url: &str) -> UrlResult<Url> {
    Url::parse(base_url).map_err(|e| UrlError::Parse(format!("{}: {}", base_url, e)))
}

/// Direct entry point for one forum: `viewforum.php?f=<id>&sid=<session>`
pub fn viewforum_url(base: &Url, forum_id: u32, session_id: &str) -> UrlResult<Url> {
    let mut url = base
        .join("viewforum.php")
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("f", &forum_id.to_string())
        .append_pair("sid", session_id);
    Ok(url)
}

/// Member roster page starting at the given member offset
pub fn memberlist_url(base: &Url, start: u32) -> UrlResult<Url> {
    let mut url = base
        .join("memberlist.php")
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    url.query_pairs_mut().append_pair("start", &start.to_string());
    Ok(url)
}

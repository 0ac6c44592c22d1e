use crate::{UrlError, UrlResult};
use url::Url;

/// Query parameter carrying a forum ID (`viewforum.php?f=12`)
pub const FORUM_PARAM: &str = "f";

/// Query parameter carrying a topic ID (`viewtopic.php?t=345`)
pub const TOPIC_PARAM: &str = "t";

/// Reads an integer ID from the named query parameter
///
/// # Examples
///
/// ```
/// use url::Url;
/// use phpbb_archiver::url::query_id;
///
/// let url = Url::parse("http://board.example/viewtopic.php?f=2&t=345&sid=abc").unwrap();
/// assert_eq!(query_id(&url, "t").unwrap(), 345);
/// assert_eq!(query_id(&url, "f").unwrap(), 2);
/// ```
pub fn query_id(url: &Url, param: &'static str) -> UrlResult<u32> {
    let value = url
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| UrlError::MissingParam {
            param,
            url: url.to_string(),
        })?;

    value.trim().parse().map_err(|_| UrlError::InvalidId {
        param,
        url: url.to_string(),
    })
}

/// Forum ID of a `viewforum.php` link
pub fn forum_id(url: &Url) -> UrlResult<u32> {
    query_id(url, FORUM_PARAM)
}

/// Topic ID of a `viewtopic.php` link
pub fn topic_id(url: &Url) -> UrlResult<u32> {
    query_id(url, TOPIC_PARAM)
}

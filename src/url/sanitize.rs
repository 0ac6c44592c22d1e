/// Reduces a forum or topic title to a safe file or directory name
///
/// Keeps alphanumeric characters (Unicode letters and digits included),
/// spaces, `.`, `_` and `-`; everything else is dropped. Trailing
/// whitespace is removed. The result may be empty.
///
/// # Examples
///
/// ```
/// use phpbb_archiver::url::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Re: What's up? (2024)"), "Re Whats up 2024");
/// assert_eq!(sanitize_filename("???"), "");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect();
    kept.trim_end().to_string()
}

/// Reduces a forum title to a directory name that stays below its parent
///
/// Same rules as [`sanitize_filename`], except that a name made only of
/// dots (`.`, `..`) comes back empty: joined to a path it would not add a
/// level below the parent.
///
/// # Examples
///
/// ```
/// use phpbb_archiver::url::sanitize_dirname;
///
/// assert_eq!(sanitize_dirname("General Talk"), "General Talk");
/// assert_eq!(sanitize_dirname(".."), "");
/// ```
pub fn sanitize_dirname(title: &str) -> String {
    let name = sanitize_filename(title);
    if name.chars().all(|c| c == '.') {
        String::new()
    } else {
        name
    }
}

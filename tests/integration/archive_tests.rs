use crate::{board_base, test_fetcher};
use phpbb_archiver::crawler::Archiver;
use phpbb_archiver::storage::FsStorage;
use phpbb_archiver::url::ForumFilter;
use phpbb_archiver::ArchiveError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(format!("<html><body>{}</body></html>", body))
}

async fn mount_page(server: &MockServer, page: &str, param: (&str, &str), body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .and(query_param(param.0, param.1))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_archives_board_tree() {
    let server = MockServer::start().await;
    let base = board_base(&server);
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a class="forumtitle" href="./viewforum.php?f=1">General</a>
               <a class="forumtitle" href="./viewforum.php?f=2">Off Topic</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Mounted before the first page so the start=25 request matches it first.
    Mock::given(method("GET"))
        .and(path("/viewforum.php"))
        .and(query_param("f", "1"))
        .and(query_param("start", "25"))
        .respond_with(html(
            r#"<a class="topictitle" href="./viewtopic.php?t=11"></a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/viewforum.php",
        ("f", "1"),
        r#"<a class="topictitle" href="./viewtopic.php?t=10">Welcome</a>
           <a class="forumtitle" href="./viewforum.php?f=3">Nested</a>
           <a rel="next" href="./viewforum.php?f=1&amp;start=25">Next</a>"#,
    )
    .await;

    mount_page(
        &server,
        "/viewforum.php",
        ("f", "3"),
        r#"<a class="topictitle" href="./viewtopic.php?t=12">Deep: Topic?</a>
           <a class="topictitle" href="./viewtopic.php?t=10">Welcome again</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/viewforum.php"))
        .and(query_param("f", "2"))
        .respond_with(html(""))
        .expect(0)
        .mount(&server)
        .await;

    for id in ["10", "11", "12"] {
        Mock::given(method("GET"))
            .and(path("/viewtopic.php"))
            .and(query_param("t", id))
            .respond_with(html(&format!("topic {}", id)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let filter = ForumFilter::new([2], [], None);
    let mut archiver = Archiver::new(test_fetcher(&base), FsStorage::new(), dir.path())
        .with_filter(filter);

    archiver.archive_forum(&base).await.unwrap();

    let root = dir.path();
    assert!(root.join("index.html").exists());
    assert!(fs::read_to_string(root.join("General/Welcome.html"))
        .unwrap()
        .contains("topic 10"));
    assert!(fs::read_to_string(root.join("General/1.html"))
        .unwrap()
        .contains("topic 11"));
    assert!(fs::read_to_string(root.join("General/Nested/Deep Topic.html"))
        .unwrap()
        .contains("topic 12"));
    assert!(!root.join("Off Topic").exists());

    let stats = archiver.finish();
    assert_eq!(stats.forums_entered, 2);
    assert_eq!(stats.listing_pages, 3);
    assert_eq!(stats.topics_saved, 3);
    assert_eq!(stats.forums_filtered, 1);
    assert_eq!(stats.duplicates_skipped, 1);
}

#[tokio::test]
async fn test_session_cookies_sent() {
    let server = MockServer::start().await;
    let base = board_base(&server);
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("cookie", "phpbb3_u=2; phpbb3_k=key; phpbb3_sid=abc123"))
        .and(header("referer", base.as_str()))
        .respond_with(html("no forums"))
        .expect(1)
        .mount(&server)
        .await;

    let mut archiver = Archiver::new(test_fetcher(&base), FsStorage::new(), dir.path());
    archiver.archive_forum(&base).await.unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("index.html")).unwrap(),
        "<html><body>no forums</body></html>"
    );
}

#[tokio::test]
async fn test_http_error_skips_topic() {
    let server = MockServer::start().await;
    let base = board_base(&server);
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/viewforum.php",
        ("f", "5"),
        r#"<a class="topictitle" href="./viewtopic.php?t=1">Gone</a>
           <a class="topictitle" href="./viewtopic.php?t=2">Kept</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/viewtopic.php"))
        .and(query_param("t", "1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/viewtopic.php", ("t", "2"), "kept").await;

    let mut archiver = Archiver::new(test_fetcher(&base), FsStorage::new(), dir.path());
    archiver.archive_direct(&base, 5, "abc123").await.unwrap();

    let forum_dir = dir.path().join("Forum_5");
    assert!(!forum_dir.join("Gone.html").exists());
    assert!(forum_dir.join("Kept.html").exists());
    assert_eq!(archiver.stats().unavailable, 1);
}

#[tokio::test]
async fn test_direct_entry_sends_session_id() {
    let server = MockServer::start().await;
    let base = board_base(&server);
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/viewforum.php"))
        .and(query_param("f", "9"))
        .and(query_param("sid", "abc123"))
        .respond_with(html(
            r#"<a class="topictitle" href="./viewtopic.php?t=90">Only</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/viewtopic.php", ("t", "90"), "only").await;

    let mut archiver = Archiver::new(test_fetcher(&base), FsStorage::new(), dir.path());
    archiver.archive_direct(&base, 9, "abc123").await.unwrap();

    assert!(dir.path().join("Forum_9/Only.html").exists());
    assert!(!dir.path().join("index.html").exists());
}

#[tokio::test]
async fn test_unreachable_landing_aborts_run() {
    let server = MockServer::start().await;
    let base = board_base(&server);
    let dir = TempDir::new().unwrap();

    // Slower than the client timeout: every attempt is a transport error.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("late").set_delay(Duration::from_secs(3)))
        .expect(2)
        .mount(&server)
        .await;

    let mut archiver = Archiver::new(test_fetcher(&base), FsStorage::new(), dir.path());
    let result = archiver.archive_forum(&base).await;

    assert!(matches!(
        result,
        Err(ArchiveError::LandingPageUnavailable { .. })
    ));
    assert!(!dir.path().join("index.html").exists());
}

use crate::{board_base, test_fetcher};
use phpbb_archiver::crawler::{extract_roster, RosterOptions};
use phpbb_archiver::output::ArchiveStats;
use phpbb_archiver::storage::FsStorage;
use phpbb_archiver::ArchiveError;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn roster_page(total: u32, members: &[&str]) -> String {
    let rows: String = members
        .iter()
        .map(|m| format!(r#"<tr><td class="info"><div> {} </div><span>joined</span></td></tr>"#, m))
        .collect();
    format!(
        r#"<html><body><div class="pagination"><span class="sr-only">Page 1 of {}</span></div><table>{}</table></body></html>"#,
        total, rows
    )
}

async fn mount_roster(server: &MockServer, start: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path("/memberlist.php"))
        .and(query_param("start", start))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_roster_walk_appends_text() {
    let server = MockServer::start().await;
    let base = board_base(&server);
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("extracted_text.txt");

    mount_roster(&server, "0", roster_page(2, &["alice", "bob"]), 2).await;
    mount_roster(&server, "25", roster_page(2, &["carol"]), 1).await;

    let options = RosterOptions {
        store_path: Some(store.clone()),
        ..RosterOptions::default()
    };
    let mut stats = ArchiveStats::new();

    extract_roster(
        &test_fetcher(&base),
        &mut FsStorage::new(),
        &base,
        &options,
        &mut stats,
    )
    .await
    .unwrap();

    assert_eq!(fs::read_to_string(&store).unwrap(), "alice\nbob\ncarol\n");
    assert_eq!(stats.roster_pages, 2);
    assert_eq!(stats.roster_entries, 3);
}

#[tokio::test]
async fn test_roster_page_failure_continues() {
    let server = MockServer::start().await;
    let base = board_base(&server);

    mount_roster(&server, "0", roster_page(3, &["alice"]), 2).await;
    Mock::given(method("GET"))
        .and(path("/memberlist.php"))
        .and(query_param("start", "25"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_roster(&server, "50", roster_page(3, &["dave"]), 1).await;

    let mut stats = ArchiveStats::new();
    extract_roster(
        &test_fetcher(&base),
        &mut FsStorage::new(),
        &base,
        &RosterOptions::default(),
        &mut stats,
    )
    .await
    .unwrap();

    assert_eq!(stats.roster_pages, 2);
    assert_eq!(stats.unavailable, 1);
}

#[tokio::test]
async fn test_roster_unavailable() {
    let server = MockServer::start().await;
    let base = board_base(&server);

    Mock::given(method("GET"))
        .and(path("/memberlist.php"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let mut stats = ArchiveStats::new();
    let result = extract_roster(
        &test_fetcher(&base),
        &mut FsStorage::new(),
        &base,
        &RosterOptions::default(),
        &mut stats,
    )
    .await;

    assert!(matches!(result, Err(ArchiveError::RosterUnavailable { .. })));
    assert_eq!(stats.roster_pages, 0);
}

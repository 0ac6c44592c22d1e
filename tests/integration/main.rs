//! Integration tests for the archiver
//!
//! These tests run the real HTTP transport against wiremock servers that
//! imitate a phpBB board, and check the archive tree written to disk.

mod archive_tests;
mod roster_tests;

use phpbb_archiver::config::{NetworkConfig, SessionConfig};
use phpbb_archiver::crawler::{
    build_headers, build_http_client, Fetcher, HttpTransport, RetryPolicy,
};
use url::Url;
use wiremock::MockServer;

/// Board root served by the mock server, with the trailing slash
pub fn board_base(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse mock server URI")
}

/// Direct (unproxied) network settings with a short timeout
pub fn test_network() -> NetworkConfig {
    NetworkConfig {
        proxy: None,
        timeout_secs: 1,
        retry_wait_secs: 0,
        max_attempts: Some(2),
        ..NetworkConfig::default()
    }
}

pub fn test_session() -> SessionConfig {
    SessionConfig {
        user_id: "2".to_string(),
        k_id: "key".to_string(),
        session_id: "abc123".to_string(),
        cookie_prefix: "phpbb3".to_string(),
    }
}

/// Fetcher over the real HTTP client, configured as the binary would
pub fn test_fetcher(base: &Url) -> Fetcher<HttpTransport> {
    let network = test_network();
    let headers =
        build_headers(&network, &test_session(), base).expect("Failed to build headers");
    let client = build_http_client(&network, headers).expect("Failed to build client");
    Fetcher::new(HttpTransport::new(client), RetryPolicy::from_config(&network))
}

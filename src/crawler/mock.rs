//! Scripted in-memory transport for unit tests

use crate::crawler::fetcher::{RawResponse, Transport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use url::Url;

/// Serves canned responses by exact URL and records every request
///
/// Queued transport failures for a URL are consumed first; after that the
/// URL's steady response is returned. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, RawResponse>,
    failures: Mutex<HashMap<String, VecDeque<String>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            RawResponse {
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_string(),
            RawResponse {
                status,
                body: String::new(),
            },
        );
        self
    }

    /// Queues `count` transport errors ahead of the URL's steady response
    pub fn with_failures(self, url: &str, count: usize) -> Self {
        {
            let mut failures = self.failures.lock().unwrap();
            let queue = failures.entry(url.to_string()).or_default();
            for n in 0..count {
                queue.push_back(format!("connection reset #{}", n + 1));
            }
        }
        self
    }

    /// Every requested URL, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// How many times `url` was requested
    pub fn count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }
}

impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let key = url.to_string();
        self.requests.lock().unwrap().push(key.clone());

        if let Some(error) = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
        {
            return Err(TransportError::Connection(error));
        }

        Ok(self.responses.get(&key).cloned().unwrap_or(RawResponse {
            status: 404,
            body: String::new(),
        }))
    }
}

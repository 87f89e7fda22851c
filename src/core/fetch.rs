//! Fetching data files over HTTP with a per-session cache
//!
//! Reads never fail from the caller's point of view: any transport, status
//! or parse problem becomes [`LoadResult::Failed`], which is cached like a
//! successful value and rendered as data by the editor and preview.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::blocking::{Client, ClientBuilder};
use serde_json::Value;
use thiserror::Error;

/// Why a read did not produce JSON
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid JSON body: {0}")]
    Parse(String),
}

/// Outcome of loading one data file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    Loaded(Value),
    /// Sentinel for a failed read, distinct from JSON `null`
    Failed,
}

impl LoadResult {
    pub fn value(&self) -> Option<&Value> {
        match self {
            LoadResult::Loaded(value) => Some(value),
            LoadResult::Failed => None,
        }
    }

    /// JSON form used inside an export bundle
    pub fn to_bundle_value(&self) -> Value {
        self.value().cloned().unwrap_or(Value::Null)
    }
}

/// Something that can GET a URL and decode its JSON body
pub trait Transport {
    fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Blocking reqwest transport
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(
            Self::client_builder()
                .build()
                .unwrap_or_else(|_| Client::new()),
        )
    }

    /// Client settings: reads wait as long as the server takes
    pub fn client_builder() -> ClientBuilder {
        Client::builder().timeout(None::<Duration>)
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.json::<Value>()
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Strictly increasing millisecond stamps for the `_` query parameter
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: u64,
}

impl CacheBuster {
    pub fn next(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.last = now.max(self.last + 1);
        self.last
    }
}

/// Fetch layer: URL building, cache-busting and session memoization
pub struct DataSource {
    data_root: String,
    transport: Box<dyn Transport>,
    buster: CacheBuster,
    cache: HashMap<String, LoadResult>,
}

impl DataSource {
    pub fn new(data_root: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            data_root: data_root.into(),
            transport,
            buster: CacheBuster::default(),
            cache: HashMap::new(),
        }
    }

    pub fn data_root(&self) -> &str {
        &self.data_root
    }

    /// Cached load; the first call for a path hits the network, later calls
    /// return the memoized result, including a memoized failure.
    pub fn load(&mut self, path: &str) -> LoadResult {
        if let Some(cached) = self.cache.get(path) {
            tracing::debug!("Cache hit for {}", path);
            return cached.clone();
        }
        let result = self.fetch(path);
        self.cache.insert(path.to_string(), result.clone());
        result
    }

    /// Uncached load; always issues a network read and leaves the cache alone
    pub fn fetch(&mut self, path: &str) -> LoadResult {
        let url = format!("{}{}?_={}", self.data_root, path, self.buster.next());
        match self.transport.get_json(&url) {
            Ok(value) => {
                tracing::info!("Fetched {}", url);
                LoadResult::Loaded(value)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                LoadResult::Failed
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::rc::Rc;
    use std::thread;
    use std::time::{Duration, Instant};

    use serde_json::json;

    /// In-memory transport keyed by path (query string stripped)
    #[derive(Clone, Default)]
    pub(crate) struct FakeTransport {
        pub responses: Rc<RefCell<HashMap<String, Value>>>,
        pub requests: Rc<RefCell<Vec<String>>>,
    }

    impl FakeTransport {
        pub fn with(entries: &[(&str, Value)]) -> Self {
            let fake = Self::default();
            for (path, value) in entries {
                fake.responses
                    .borrow_mut()
                    .insert(path.to_string(), value.clone());
            }
            fake
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for FakeTransport {
        fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            let path = url
                .split('?')
                .next()
                .and_then(|u| u.strip_prefix("mem://data/"))
                .unwrap_or(url);
            self.responses
                .borrow()
                .get(path)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    fn source(fake: &FakeTransport) -> DataSource {
        DataSource::new("mem://data/", Box::new(fake.clone()))
    }

    #[test]
    fn test_load_memoizes_success() {
        let fake = FakeTransport::with(&[("site/nav.json", json!({"links": []}))]);
        let mut source = source(&fake);

        assert_eq!(source.load("site/nav.json"), LoadResult::Loaded(json!({"links": []})));
        assert_eq!(source.load("site/nav.json"), LoadResult::Loaded(json!({"links": []})));
        assert_eq!(fake.request_count(), 1);
    }

    #[test]
    fn test_load_memoizes_failure() {
        let fake = FakeTransport::default();
        let mut source = source(&fake);

        assert_eq!(source.load("pages/team.json"), LoadResult::Failed);
        assert_eq!(source.load("pages/team.json"), LoadResult::Failed);
        assert_eq!(fake.request_count(), 1);
    }

    #[test]
    fn test_fetch_bypasses_cache() {
        let fake = FakeTransport::with(&[("a.json", json!(1))]);
        let mut source = source(&fake);

        source.load("a.json");
        source.fetch("a.json");
        source.fetch("a.json");
        assert_eq!(fake.request_count(), 3);
    }

    #[test]
    fn test_urls_carry_distinct_cache_busters() {
        let fake = FakeTransport::with(&[("a.json", json!(1))]);
        let mut source = source(&fake);

        source.fetch("a.json");
        source.fetch("a.json");
        let requests = fake.requests.borrow();
        assert!(requests[0].starts_with("mem://data/a.json?_="));
        assert_ne!(requests[0], requests[1]);
    }

    #[test]
    fn test_cache_buster_strictly_increases() {
        let mut buster = CacheBuster::default();
        let mut last = buster.next();
        for _ in 0..1000 {
            let next = buster.next();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_failed_is_distinct_from_null() {
        let fake = FakeTransport::with(&[("null.json", Value::Null)]);
        let mut source = source(&fake);

        assert_eq!(source.load("null.json"), LoadResult::Loaded(Value::Null));
        assert_eq!(LoadResult::Failed.to_bundle_value(), Value::Null);
    }

    /// Serve exactly one HTTP response on a local port
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        serve_once_after(Duration::ZERO, status_line, body)
    }

    /// Like `serve_once`, but wait `delay` before answering
    fn serve_once_after(delay: Duration, status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                thread::sleep(delay);
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/data/", addr)
    }

    fn local_transport() -> Box<HttpTransport> {
        let client = HttpTransport::client_builder().no_proxy().build().unwrap();
        Box::new(HttpTransport::with_client(client))
    }

    #[test]
    fn test_http_transport_success() {
        let root = serve_once("HTTP/1.1 200 OK", r#"{"title":"Home"}"#);
        let mut source = DataSource::new(root, local_transport());
        assert_eq!(
            source.load("pages/index.json"),
            LoadResult::Loaded(json!({"title": "Home"}))
        );
    }

    #[test]
    fn test_http_transport_status_is_failure() {
        let root = serve_once("HTTP/1.1 404 Not Found", "{}");
        let mut source = DataSource::new(root, local_transport());
        assert_eq!(source.load("pages/index.json"), LoadResult::Failed);
    }

    #[test]
    fn test_http_transport_bad_body_is_failure() {
        let root = serve_once("HTTP/1.1 200 OK", "<html>not json</html>");
        let mut source = DataSource::new(root, local_transport());
        assert_eq!(source.load("pages/index.json"), LoadResult::Failed);
    }

    #[test]
    fn test_http_transport_waits_for_slow_server() {
        let delay = Duration::from_millis(1500);
        let root = serve_once_after(delay, "HTTP/1.1 200 OK", r#"{"slow":true}"#);
        let mut source = DataSource::new(root, local_transport());

        let started = Instant::now();
        assert_eq!(
            source.load("pages/index.json"),
            LoadResult::Loaded(json!({"slow": true}))
        );
        assert!(started.elapsed() >= delay);
    }
}

pub mod html;

use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::random::{RandomSource, ThreadRandom};

pub use html::{Element, HtmlDocument, SelectAll};

/// Politeness delay bounds, in whole seconds.
const MIN_DELAY_SECS: i64 = 1;
const MAX_DELAY_SECS: i64 = 3;

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP GET.
pub trait Transport {
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<RawResponse>;
}

/// Production transport over a shared `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<RawResponse> {
        let mut request = self.agent.get(url);
        for (key, value) in params {
            request = request.query(*key, *value);
        }

        match request.call() {
            Ok(mut response) => {
                let status = response.status().as_u16();
                let body = response
                    .body_mut()
                    .read_to_string()
                    .map_err(|source| Error::Transport {
                        url: url.to_string(),
                        source,
                    })?;
                Ok(RawResponse { status, body })
            }
            // ureq reports 4xx/5xx as errors; surface them as a status instead
            Err(ureq::Error::StatusCode(status)) => Ok(RawResponse {
                status,
                body: String::new(),
            }),
            Err(source) => Err(Error::Transport {
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Fetch-and-parse capability the scrapers depend on.
pub trait Fetch {
    fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<HtmlDocument>;
}

/// Fail unless `url` belongs to the page family rooted at `endpoint`.
pub fn ensure_supported(url: &str, endpoint: &str) -> Result<()> {
    if url.starts_with(endpoint) {
        Ok(())
    } else {
        Err(Error::UnsupportedPage {
            url: url.to_string(),
            endpoint: endpoint.to_string(),
        })
    }
}

/// Resolve a possibly relative `href` against `endpoint`.
pub fn resolve_href(endpoint: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// Sleeps a random 1–3 s before each request, then GETs and parses the page.
pub struct PageFetcher<T: Transport> {
    transport: T,
    random: Box<dyn RandomSource>,
    pause: fn(Duration),
}

impl PageFetcher<UreqTransport> {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }
}

impl Default for PageFetcher<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> PageFetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            random: Box::new(ThreadRandom),
            pause: thread::sleep,
        }
    }

    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_pause(mut self, pause: fn(Duration)) -> Self {
        self.pause = pause;
        self
    }
}

impl<T: Transport> Fetch for PageFetcher<T> {
    fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<HtmlDocument> {
        let secs = self.random.next_int(MIN_DELAY_SECS, MAX_DELAY_SECS);
        (self.pause)(Duration::from_secs(secs as u64));

        log::debug!("GET {url} {params:?}");
        let response = self.transport.get(url, params)?;
        if response.status != 200 {
            log::warn!("{url} returned {}", response.status);
            return Err(Error::Http(response.status));
        }
        Ok(HtmlDocument::parse(&response.body))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Canned responses keyed by URL; unknown URLs answer 404.
    #[derive(Default)]
    pub struct FakeTransport {
        pages: HashMap<String, RawResponse>,
        pub requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeTransport {
        pub fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                RawResponse {
                    status: 200,
                    body: body.to_string(),
                },
            );
            self
        }

        pub fn status(mut self, url: &str, status: u16) -> Self {
            self.pages.insert(
                url.to_string(),
                RawResponse {
                    status,
                    body: String::new(),
                },
            );
            self
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<RawResponse> {
            self.requests.borrow_mut().push((
                url.to_string(),
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ));
            Ok(self.pages.get(url).cloned().unwrap_or(RawResponse {
                status: 404,
                body: String::new(),
            }))
        }
    }

    pub fn no_pause(_: Duration) {}

    pub fn last_params(f: &PageFetcher<FakeTransport>) -> Vec<(String, String)> {
        f.transport
            .requests
            .borrow()
            .last()
            .map(|(_, params)| params.clone())
            .unwrap_or_default()
    }

    pub fn request_count(f: &PageFetcher<FakeTransport>) -> usize {
        f.transport.requests.borrow().len()
    }

    pub fn fetcher(transport: FakeTransport) -> PageFetcher<FakeTransport> {
        PageFetcher::with_transport(transport).with_pause(no_pause)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::testing::*;
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn test_ensure_supported() {
        assert!(ensure_supported("https://gochiusa.info/song/1", "https://gochiusa.info/").is_ok());
        let err = ensure_supported("https://example.com/", "https://gochiusa.info/").unwrap_err();
        assert!(matches!(err, Error::UnsupportedPage { .. }));
    }

    #[test]
    fn test_resolve_href() {
        let ep = "https://gochiusa.info/";
        assert_eq!(resolve_href(ep, "song/12"), "https://gochiusa.info/song/12");
        assert_eq!(resolve_href(ep, "/song/12"), "https://gochiusa.info/song/12");
        assert_eq!(
            resolve_href(ep, "https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_fetch_parses_ok_page() {
        let f = fetcher(FakeTransport::default().page("https://a/", "<h1>hi</h1>"));
        let doc = f.fetch("https://a/", &[]).unwrap();
        assert_eq!(doc.select_first("h1", "heading").unwrap().text, "hi");
    }

    #[test]
    fn test_fetch_non_200_is_http_error() {
        let f = fetcher(FakeTransport::default().status("https://a/gone", 404));
        assert!(matches!(f.fetch("https://a/gone", &[]), Err(Error::Http(404))));

        let f = fetcher(FakeTransport::default().status("https://a/moved", 204));
        assert!(matches!(f.fetch("https://a/moved", &[]), Err(Error::Http(204))));
    }

    #[test]
    fn test_fetch_forwards_query_params() {
        let f = fetcher(FakeTransport::default().page("https://a/s", "<p></p>"));
        f.fetch("https://a/s", &[("kind", "title"), ("how", "2")]).unwrap();
        let reqs = f.transport.requests.borrow();
        assert_eq!(reqs.len(), 1);
        assert_eq!(
            reqs[0].1,
            vec![
                ("kind".to_string(), "title".to_string()),
                ("how".to_string(), "2".to_string())
            ]
        );
    }

    thread_local! {
        static PAUSES: RefCell<Vec<Duration>> = const { RefCell::new(Vec::new()) };
    }

    fn record_pause(d: Duration) {
        PAUSES.with(|p| p.borrow_mut().push(d));
    }

    fn recorded_pauses(seed: u64, requests: usize) -> Vec<Duration> {
        PAUSES.with(|p| p.borrow_mut().clear());
        let f = PageFetcher::with_transport(FakeTransport::default().page("https://a/", ""))
            .with_random(Box::new(SeededRandom::new(seed)))
            .with_pause(record_pause);
        for _ in 0..requests {
            f.fetch("https://a/", &[]).unwrap();
        }
        PAUSES.with(|p| p.borrow().clone())
    }

    #[test]
    fn test_pause_before_every_request_within_bounds() {
        let pauses = recorded_pauses(3, 10);
        assert_eq!(pauses.len(), 10);
        assert!(pauses.iter().all(|d| (1..=3).contains(&d.as_secs())));
    }

    #[test]
    fn test_pause_follows_injected_random_source() {
        assert_eq!(recorded_pauses(11, 8), recorded_pauses(11, 8));
    }
}

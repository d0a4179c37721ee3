//! Outbound requests to the search endpoint

use std::cell::Cell;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::CheckConfig;
use crate::error::FetchError;
use crate::utils::sleep_unless_stopped;

/// Fetches the results page for one query
pub(crate) trait Fetcher {
    fn fetch(&self, query: &str) -> Result<String, FetchError>;
}

/// Plain HTTPS GET against the configured search endpoint
pub(crate) struct HttpFetcher {
    agent: ureq::Agent,
    endpoint: String,
    user_agent: &'static str,
    accept_language: String,
}

impl HttpFetcher {
    pub(crate) fn new(config: &CheckConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            user_agent: config.user_agent.header_value(),
            accept_language: config.accept_language.clone(),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, query: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self
            .agent
            .get(self.endpoint.as_str())
            .query("q", query)
            .header("User-Agent", self.user_agent)
            .header("Accept-Language", self.accept_language.as_str())
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();
        let text = body
            .read_to_string()
            .map_err(|e| FetchError::Body(e.to_string()))?;
        debug!(
            query,
            status,
            bytes = text.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetched results page"
        );

        if !(200..300).contains(&status) {
            return Err(FetchError::Status { status, body: text });
        }
        Ok(text)
    }
}

/// Enforces a minimum gap between consecutive requests of the wrapped fetcher.
/// The first request goes out immediately.
pub(crate) struct Throttled<'a> {
    inner: Box<dyn Fetcher + 'a>,
    delay: Duration,
    last: Cell<Option<Instant>>,
    stop: &'a AtomicBool,
}

impl<'a> Throttled<'a> {
    pub(crate) fn new(inner: Box<dyn Fetcher + 'a>, delay: Duration, stop: &'a AtomicBool) -> Self {
        Self {
            inner,
            delay,
            last: Cell::new(None),
            stop,
        }
    }
}

impl Fetcher for Throttled<'_> {
    fn fetch(&self, query: &str) -> Result<String, FetchError> {
        if let Some(last) = self.last.get() {
            let elapsed = last.elapsed();
            if elapsed < self.delay && !sleep_unless_stopped(self.delay - elapsed, self.stop) {
                return Err(FetchError::Interrupted);
            }
        }
        let result = self.inner.fetch(query);
        self.last.set(Some(Instant::now()));
        result
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;

    use super::Fetcher;
    use crate::error::FetchError;

    /// Canned responses keyed by query prefix (`site:`, `cache:` or empty for any)
    #[derive(Default)]
    pub(crate) struct MockFetcher {
        responses: Vec<(String, Result<String, u16>)>,
        pub(crate) queries: RefCell<Vec<String>>,
    }

    impl MockFetcher {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(mut self, prefix: &str, body: &str) -> Self {
            self.responses.push((prefix.to_string(), Ok(body.to_string())));
            self
        }

        pub(crate) fn fail(mut self, prefix: &str, status: u16) -> Self {
            self.responses.push((prefix.to_string(), Err(status)));
            self
        }

        pub(crate) fn queries(&self) -> Vec<String> {
            self.queries.borrow().clone()
        }
    }

    impl Fetcher for MockFetcher {
        fn fetch(&self, query: &str) -> Result<String, FetchError> {
            self.queries.borrow_mut().push(query.to_string());
            let found = self
                .responses
                .iter()
                .find(|(prefix, _)| query.starts_with(prefix.as_str()));
            match found {
                Some((_, Ok(body))) => Ok(body.clone()),
                Some((_, Err(status))) => Err(FetchError::Status {
                    status: *status,
                    body: String::new(),
                }),
                None => Err(FetchError::Network("no canned response".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockFetcher;
    use super::*;

    #[test]
    fn throttle_spaces_consecutive_requests() {
        let stop = AtomicBool::new(false);
        let fetcher = Throttled::new(
            Box::new(MockFetcher::new().respond("", "ok")),
            Duration::from_millis(60),
            &stop,
        );
        let start = Instant::now();
        fetcher.fetch("a").unwrap();
        let first = start.elapsed();
        fetcher.fetch("b").unwrap();
        assert!(first < Duration::from_millis(60));
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn throttle_returns_interrupted_when_stopped() {
        let stop = AtomicBool::new(false);
        let fetcher = Throttled::new(
            Box::new(MockFetcher::new().respond("", "ok")),
            Duration::from_secs(30),
            &stop,
        );
        fetcher.fetch("a").unwrap();
        stop.store(true, std::sync::atomic::Ordering::Relaxed);
        assert!(matches!(fetcher.fetch("b"), Err(FetchError::Interrupted)));
    }

    #[test]
    fn mock_records_queries_in_order() {
        let mock = MockFetcher::new().respond("site:", "x").fail("cache:", 500);
        assert!(mock.fetch("site:a").is_ok());
        assert!(matches!(
            mock.fetch("cache:a"),
            Err(FetchError::Status { status: 500, .. })
        ));
        assert_eq!(mock.queries(), vec!["site:a", "cache:a"]);
    }
}

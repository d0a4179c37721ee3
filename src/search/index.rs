use tracing::{debug, warn};

use crate::core::{IndexResult, IndexStatus, QueryStrategy};
use crate::error::FetchError;

use super::client::Fetcher;
use super::rules::RuleSet;

/// Runs the index query for a URL and classifies the returned page
#[derive(Debug, Clone)]
pub(crate) struct IndexChecker {
    strategy: QueryStrategy,
    rules: RuleSet,
}

impl IndexChecker {
    pub(crate) fn new(strategy: QueryStrategy) -> Self {
        Self::with_rules(strategy, RuleSet::for_strategy(strategy))
    }

    pub(crate) fn with_rules(strategy: QueryStrategy, rules: RuleSet) -> Self {
        Self { strategy, rules }
    }

    /// Classify already-fetched markup
    pub(crate) fn classify(&self, url: &str, markup: String) -> IndexResult {
        let (status, rule) = self.rules.classify(&markup, url);
        debug!(url, rule, ?status, "classified results page");
        IndexResult {
            url: url.to_string(),
            status,
            rule,
            markup,
        }
    }

    /// Network failures come back as `Err`; a challenge page served with an error
    /// status is still reported as `Blocked`.
    pub(crate) fn check(&self, fetcher: &dyn Fetcher, url: &str) -> Result<IndexResult, FetchError> {
        let query = self.strategy.index_query(url);
        debug!(query, "index query");
        match fetcher.fetch(&query) {
            Ok(markup) => Ok(self.classify(url, markup)),
            Err(FetchError::Status { status, body }) => match self.rules.blocked_by(&body) {
                Some(rule) => {
                    warn!(url, status, "search engine served a challenge page");
                    Ok(IndexResult {
                        url: url.to_string(),
                        status: IndexStatus::Blocked,
                        rule,
                        markup: body,
                    })
                }
                None => Err(FetchError::Status { status, body }),
            },
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::client::mock::MockFetcher;

    const URL: &str = "https://example.com/profile/123";

    #[test]
    fn site_query_is_sent() {
        let fetcher = MockFetcher::new().respond("site:", "About 1,230 results");
        let checker = IndexChecker::new(QueryStrategy::Site);
        let result = checker.check(&fetcher, URL).unwrap();
        assert!(result.indexed());
        assert_eq!(fetcher.queries(), vec![format!("site:{URL}")]);
    }

    #[test]
    fn bare_query_is_sent() {
        let fetcher = MockFetcher::new().respond("", "nothing here");
        let checker = IndexChecker::new(QueryStrategy::Bare);
        let result = checker.check(&fetcher, URL).unwrap();
        assert_eq!(result.status, IndexStatus::NotIndexed);
        assert_eq!(fetcher.queries(), vec![URL.to_string()]);
    }

    #[test]
    fn markup_is_retained() {
        let fetcher = MockFetcher::new().respond("site:", "<p>About 2 results</p>");
        let result = IndexChecker::new(QueryStrategy::Site)
            .check(&fetcher, URL)
            .unwrap();
        assert_eq!(result.markup, "<p>About 2 results</p>");
        assert_eq!(result.rule, "result-count");
    }

    #[test]
    fn http_error_without_challenge_is_error() {
        let fetcher = MockFetcher::new().fail("site:", 503);
        let err = IndexChecker::new(QueryStrategy::Site)
            .check(&fetcher, URL)
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    struct ChallengeFetcher;

    impl Fetcher for ChallengeFetcher {
        fn fetch(&self, _query: &str) -> Result<String, FetchError> {
            Err(FetchError::Status {
                status: 429,
                body: "Our systems have detected unusual traffic from your computer".to_string(),
            })
        }
    }

    #[test]
    fn challenge_with_error_status_is_blocked() {
        let result = IndexChecker::new(QueryStrategy::Site)
            .check(&ChallengeFetcher, URL)
            .unwrap();
        assert_eq!(result.status, IndexStatus::Blocked);
        assert!(!result.indexed());
    }
}

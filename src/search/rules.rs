//! Ordered heuristic rules mapping results-page markup to an index verdict.
//!
//! Rules are evaluated top to bottom and the first match wins. Challenge rules are
//! always placed first so a blocked page can never be read as "indexed".

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{IndexStatus, QueryStrategy};

static CHALLENGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)unusual traffic|recaptcha|/sorry/index").unwrap()
});

/// "About 1,230 results", "results 1", "Khoảng 1.230 kết quả", "Có khoảng ..."
static RESULT_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)about\s+[\d,.]+\s+results?|\bresults?\s+\d|(?:có\s+)?khoảng\s+[\d.,]+\s+kết\s+quả|có\s+khoảng|kết\s+quả\s+\d",
    )
    .unwrap()
});

static NO_RESULTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)did not match any documents|no results found|không tìm thấy|không khớp với bất kỳ tài liệu nào",
    )
    .unwrap()
});

/// What a rule looks for in the markup
#[derive(Debug, Clone)]
pub(crate) enum Signal {
    Pattern(Regex),
    /// Literal substring of the raw markup
    Marker(&'static str),
    /// A result link pointing at the URL being checked
    TargetLink,
}

impl Signal {
    fn matches(&self, markup: &str, target: &str) -> bool {
        match self {
            Signal::Pattern(re) => re.is_match(markup),
            Signal::Marker(marker) => markup.contains(marker),
            Signal::TargetLink => target_link_regex(target).is_some_and(|re| re.is_match(markup)),
        }
    }
}

/// Matches `href="https://www.example.com/a"` or `/url?q=https://example.com/a` for target `example.com/a`
fn target_link_regex(target: &str) -> Option<Regex> {
    let bare = strip_scheme(target.trim());
    let bare = bare.trim_end_matches('/');
    if bare.is_empty() {
        return None;
    }
    let pattern = format!(
        r#"(?i)(?:href="|/url\?q=)(?:https?://)?(?:www\.)?{}/?(?:["&?#]|$)"#,
        regex::escape(bare)
    );
    Regex::new(&pattern).ok()
}

fn strip_scheme(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_prefix("www.").unwrap_or(rest)
}

#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    pub(crate) signal: Signal,
    pub(crate) verdict: IndexStatus,
}

impl Rule {
    pub(crate) fn new(name: &'static str, signal: Signal, verdict: IndexStatus) -> Self {
        Self {
            name,
            signal,
            verdict,
        }
    }
}

/// Name reported when no rule matched
pub(crate) const FALLBACK_RULE: &str = "fallback";

#[derive(Debug, Clone, Default)]
pub(crate) struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Only the anti-automation challenge rules
    pub(crate) fn challenges() -> Self {
        Self {
            rules: vec![Rule::new(
                "challenge",
                Signal::Pattern(CHALLENGE.clone()),
                IndexStatus::Blocked,
            )],
        }
    }

    pub(crate) fn for_strategy(strategy: QueryStrategy) -> Self {
        let mut set = Self::challenges();
        match strategy {
            QueryStrategy::Site => {
                set.push(Rule::new(
                    "result-count",
                    Signal::Pattern(RESULT_COUNT.clone()),
                    IndexStatus::Indexed,
                ));
                set.push(Rule::new(
                    "no-results",
                    Signal::Pattern(NO_RESULTS.clone()),
                    IndexStatus::NotIndexed,
                ));
                set.push(Rule::new(
                    "result-block",
                    Signal::Marker(r#"class="g""#),
                    IndexStatus::Indexed,
                ));
                set.push(Rule::new(
                    "search-container",
                    Signal::Marker(r#"id="search""#),
                    IndexStatus::Indexed,
                ));
            }
            // A bare query almost always returns something, so counts prove nothing.
            QueryStrategy::Bare => {
                set.push(Rule::new(
                    "no-results",
                    Signal::Pattern(NO_RESULTS.clone()),
                    IndexStatus::NotIndexed,
                ));
                set.push(Rule::new(
                    "target-link",
                    Signal::TargetLink,
                    IndexStatus::Indexed,
                ));
            }
        }
        set
    }

    pub(crate) fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Insert a rule right after the challenge rules
    #[cfg(test)]
    pub(crate) fn prioritize(&mut self, rule: Rule) {
        let at = self
            .rules
            .iter()
            .take_while(|r| r.verdict == IndexStatus::Blocked)
            .count();
        self.rules.insert(at, rule);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    /// First matching rule's verdict, or `NotIndexed` for an unrecognised page
    pub(crate) fn classify(&self, markup: &str, target: &str) -> (IndexStatus, &'static str) {
        self.rules
            .iter()
            .find(|rule| rule.signal.matches(markup, target))
            .map(|rule| (rule.verdict, rule.name))
            .unwrap_or((IndexStatus::NotIndexed, FALLBACK_RULE))
    }

    /// Name of the first challenge rule matching the markup
    pub(crate) fn blocked_by(&self, markup: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.verdict == IndexStatus::Blocked)
            .find(|rule| rule.signal.matches(markup, ""))
            .map(|rule| rule.name)
    }
}

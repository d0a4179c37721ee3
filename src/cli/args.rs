//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::Config;
use crate::consts::{
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_DELAY_SECS, DEFAULT_ENDPOINT, DEFAULT_MAX_URLS, REQUEST_TIMEOUT,
};
use crate::core::{
    CheckConfig, DateStyle, QueryStrategy, UserAgentPreset, validate_delay, validate_header_row,
    validate_max_urls,
};
use crate::error::AppError;
use crate::utils::{Timezone, parse_date};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "indexcheck")]
#[command(about = "Check whether URLs are indexed by a search engine and how recently they were cached", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Seconds to wait between two requests (0-60, default 2)
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) delay: Option<f64>,

    /// Maximum number of URLs to check (1-1000, default 1000)
    #[arg(long, global = true, value_name = "N")]
    pub(crate) max_urls: Option<usize>,

    /// Browser identity sent with requests
    #[arg(long, global = true, value_enum)]
    pub(crate) user_agent: Option<UserAgentPreset>,

    /// Row holding the column headers (1-based, default 1)
    #[arg(long, global = true, value_name = "ROW")]
    pub(crate) header_row: Option<usize>,

    /// Column holding the URLs (case-insensitive header name)
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) column: Option<String>,

    /// How the index query is phrased
    #[arg(long, global = true, value_enum)]
    pub(crate) query: Option<QueryStrategy>,

    /// Format of the Cached Date column
    #[arg(long, global = true, value_enum)]
    pub(crate) date_format: Option<DateStyle>,

    /// Timezone that defines "today" (e.g., "Asia/Ho_Chi_Minh", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Pin "today" for the 30-day window (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub(crate) today: Option<String>,

    /// Search endpoint queried with ?q=
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) endpoint: Option<String>,

    /// Accept-Language header sent with requests
    #[arg(long, global = true, value_name = "LANG")]
    pub(crate) accept_language: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging (queries, statuses, firing rules)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Only log warnings and hide progress lines
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Read settings from this file instead of the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            self.color = color;
        }

        self.delay = self.delay.or(config.delay);
        self.max_urls = self.max_urls.or(config.max_urls);
        self.user_agent = self.user_agent.or(config.user_agent);
        self.header_row = self.header_row.or(config.header_row);
        self.query = self.query.or(config.query);
        self.date_format = self.date_format.or(config.date_format);
        if self.column.is_none() {
            self.column = config.column.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.endpoint.is_none() {
            self.endpoint = config.endpoint.clone();
        }
        if self.accept_language.is_none() {
            self.accept_language = config.accept_language.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn date_style(&self) -> DateStyle {
        self.date_format.unwrap_or_default()
    }

    pub(crate) fn header_row(&self) -> Result<usize, AppError> {
        validate_header_row(self.header_row.unwrap_or(1))
    }

    /// "Today" for the recency window: `--today` if given, else the current date in `--timezone`
    pub(crate) fn today(&self) -> Result<NaiveDate, AppError> {
        let timezone = Timezone::parse(Some(self.timezone.as_deref().unwrap_or("UTC")))?;
        match &self.today {
            Some(s) => parse_date(s),
            None => Ok(timezone.today()),
        }
    }

    pub(crate) fn check_config(&self) -> Result<CheckConfig, AppError> {
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AppError::InvalidSetting {
                name: "endpoint",
                reason: format!("expected an http(s) URL, got {endpoint}"),
            });
        }
        Ok(CheckConfig {
            endpoint,
            user_agent: self.user_agent.unwrap_or_default(),
            accept_language: self
                .accept_language
                .clone()
                .unwrap_or_else(|| DEFAULT_ACCEPT_LANGUAGE.to_string()),
            timeout: REQUEST_TIMEOUT,
            delay: validate_delay(self.delay.unwrap_or(DEFAULT_DELAY_SECS))?,
            max_urls: validate_max_urls(self.max_urls.unwrap_or(DEFAULT_MAX_URLS))?,
            strategy: self.query.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["indexcheck"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_produce_default_check_config() {
        let cli = parse(&["check", "in.xlsx"]);
        let config = cli.check_config().unwrap();
        assert_eq!(config.delay, Duration::from_secs(2));
        assert_eq!(config.max_urls, 1000);
        assert_eq!(config.strategy, QueryStrategy::Site);
        assert_eq!(config.user_agent, UserAgentPreset::Chrome);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.header_row().unwrap(), 1);
        assert_eq!(cli.date_style(), DateStyle::Dmy);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["check", "in.xlsx", "--delay", "0.5", "--query", "bare", "--max-urls", "10"]);
        let config = cli.check_config().unwrap();
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.strategy, QueryStrategy::Bare);
        assert_eq!(config.max_urls, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(&["check", "a.csv", "--delay", "61"]).check_config().is_err());
        assert!(parse(&["check", "a.csv", "--max-urls", "0"]).check_config().is_err());
        assert!(parse(&["check", "a.csv", "--max-urls", "1001"]).check_config().is_err());
        assert!(parse(&["check", "a.csv", "--header-row", "0"]).header_row().is_err());
        assert!(parse(&["check", "a.csv", "--endpoint", "ftp://x"]).check_config().is_err());
        assert!(parse(&["check", "a.csv", "--timezone", "Mars/Olympus"]).today().is_err());
        assert!(parse(&["check", "a.csv", "--today", "June"]).today().is_err());
    }

    #[test]
    fn pinned_today() {
        let cli = parse(&["check", "a.csv", "--today", "2025-06-15"]);
        assert_eq!(cli.today().unwrap(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }

    #[test]
    fn config_fills_unset_values_only() {
        let config: Config = toml::from_str(
            r#"
            delay = 5.0
            max_urls = 50
            query = "bare"
            column = "Link"
            no_color = true
            "#,
        )
        .unwrap();
        let cli = parse(&["check", "a.csv", "--delay", "1"]).with_config(&config);
        assert_eq!(cli.delay, Some(1.0));
        assert_eq!(cli.max_urls, Some(50));
        assert_eq!(cli.query, Some(QueryStrategy::Bare));
        assert_eq!(cli.column.as_deref(), Some("Link"));
        assert!(!cli.use_color());
    }

    #[test]
    fn color_never_disables_color() {
        let cli = parse(&["inspect", "a.csv", "--color", "never"]);
        assert!(!cli.use_color());
        let cli = parse(&["inspect", "a.csv", "--color", "always"]);
        assert!(cli.use_color());
    }
}

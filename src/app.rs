//! Subcommand handlers

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::batch::{BatchRunner, Sheet, StderrProgress, select_urls};
use crate::cli::{Cli, Commands, PageKind};
use crate::consts::PREVIEW_ROWS;
use crate::core::{CacheDate, classify_recency, expected_min_duration};
use crate::error::AppError;
use crate::output::{
    ResultTableOptions, cached_date_text, format_duration, output_results_json,
    print_results_table, print_url_list, write_results,
};
use crate::search::{CacheDateExtractor, HttpFetcher, IndexChecker, Throttled, normalize};
use crate::utils::install_interrupt_handler;

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Check { input, output } => handle_check(cli, input, output),
        Commands::Inspect { input, show } => handle_inspect(cli, input, *show),
        Commands::Classify { page, kind, url } => handle_classify(cli, page, *kind, url),
    }
}

fn handle_check(cli: &Cli, input: &Path, output: &Path) -> Result<(), AppError> {
    // Settings are validated before touching the file or the network
    let config = cli.check_config()?;
    let header_row = cli.header_row()?;
    let today = cli.today()?;

    let sheet = Sheet::load(input)?;
    let list = select_urls(&sheet, header_row, cli.column.as_deref(), config.max_urls)?;
    if !cli.quiet {
        eprintln!(
            "Checking {} URLs from column {} ({}). This takes at least {}.",
            list.urls.len(),
            if list.column.name.is_empty() {
                list.column.letter()
            } else {
                list.column.name.clone()
            },
            list.column.strategy,
            format_duration(expected_min_duration(list.urls.len(), config.delay)),
        );
    }
    info!(
        endpoint = config.endpoint.as_str(),
        delay_ms = config.delay.as_millis() as u64,
        strategy = ?config.strategy,
        %today,
        "starting check"
    );

    let stop = install_interrupt_handler();
    let fetcher = Throttled::new(Box::new(HttpFetcher::new(&config)), config.delay, stop);
    let runner = BatchRunner::new(
        &fetcher,
        IndexChecker::new(config.strategy),
        CacheDateExtractor::default(),
        today,
        stop,
    );
    let mut progress = StderrProgress::new(cli.quiet);
    let report = runner.run(&list.urls, &mut progress);

    if cli.json {
        println!("{}", output_results_json(&report.rows, cli.date_style()));
    } else {
        print_results_table(
            &report,
            ResultTableOptions {
                use_color: cli.use_color(),
                date_style: cli.date_style(),
                limit: PREVIEW_ROWS,
            },
        );
    }

    write_results(output, &report.rows, cli.date_style())?;
    if report.interrupted {
        warn!(path = %output.display(), rows = report.rows.len(), "wrote partial results");
    } else {
        info!(path = %output.display(), rows = report.rows.len(), "wrote results");
    }
    if !cli.quiet {
        eprintln!("Results written to {}", output.display());
    }
    Ok(())
}

fn handle_inspect(cli: &Cli, input: &Path, show: usize) -> Result<(), AppError> {
    let config = cli.check_config()?;
    let sheet = Sheet::load(input)?;
    let list = select_urls(&sheet, cli.header_row()?, cli.column.as_deref(), config.max_urls)?;

    if cli.json {
        let json = serde_json::json!({
            "column": list.column.name,
            "letter": list.column.letter(),
            "strategy": list.column.strategy.to_string(),
            "candidates": list.column.candidates,
            "found": list.found,
            "selected": list.urls.len(),
            "urls": list.urls.iter().take(show).collect::<Vec<_>>(),
            "expected_min_secs": expected_min_duration(list.urls.len(), config.delay).as_secs_f64(),
        });
        println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
    } else {
        print_url_list(&list, show, cli.use_color());
        println!(
            "Expected minimum duration: {}",
            format_duration(expected_min_duration(list.urls.len(), config.delay))
        );
    }
    Ok(())
}

fn handle_classify(cli: &Cli, page: &Path, kind: PageKind, url: &str) -> Result<(), AppError> {
    let markup = fs::read_to_string(page).map_err(|source| AppError::ReadFile {
        path: page.to_path_buf(),
        source,
    })?;

    match kind {
        PageKind::Index => {
            let strategy = cli.query.unwrap_or_default();
            let result = IndexChecker::new(strategy).classify(url, markup);
            if cli.json {
                let json = serde_json::json!({
                    "url": result.url,
                    "status": result.status,
                    "indexed": result.indexed(),
                    "rule": result.rule,
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            } else {
                println!("Verdict: {:?}", result.status);
                println!("Rule:    {}", result.rule);
            }
        }
        PageKind::Cache => {
            let today = cli.today()?;
            let extractor = CacheDateExtractor::default();
            let found = extractor.find(&markup);
            let date = found.as_ref().map(normalize);
            let recency = classify_recency(date.as_ref(), today);
            let formatted = cached_date_text(date.as_ref(), cli.date_style());
            if cli.json {
                let json = serde_json::json!({
                    "pattern": found.as_ref().map(|r| r.pattern),
                    "raw": found.as_ref().map(|r| r.text.as_str()),
                    "date": date.as_ref().and_then(CacheDate::date).map(|d| cli.date_style().format(d)),
                    "recently_indexed": recency,
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            } else {
                match &found {
                    Some(raw) => {
                        println!("Pattern: {}", raw.pattern);
                        println!("Raw:     {}", raw.text);
                        match &date {
                            Some(CacheDate::Parsed { .. }) => println!("Date:    {formatted}"),
                            _ => println!("Date:    (not recognised)"),
                        }
                    }
                    None => println!("No cache date found"),
                }
                println!("Indexed In Last 30 Days: {}", recency.label());
            }
        }
    }
    Ok(())
}

//! CLI subcommand definitions

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::consts::DEFAULT_OUTPUT_FILE;

/// Which kind of saved results page `classify` reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum PageKind {
    /// A `site:` or bare-URL results page (default)
    #[default]
    Index,
    /// A `cache:` results page
    Cache,
}

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check every URL of a spreadsheet and write the results
    Check {
        /// Spreadsheet with the URLs (.xlsx, .xlsm, .xls, .ods or .csv)
        input: PathBuf,
        /// Output file (.xlsx, or .csv by extension)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
    },
    /// Show the detected URL column and the URLs a check would use (no network)
    Inspect {
        input: PathBuf,
        /// Number of URLs to list
        #[arg(long, default_value_t = 5)]
        show: usize,
    },
    /// Run the heuristics against a saved results page (no network)
    Classify {
        /// Saved HTML of a results page
        page: PathBuf,
        /// Kind of page
        #[arg(long = "page", value_enum, default_value = "index")]
        kind: PageKind,
        /// URL the page was fetched for (needed by the bare-query link rule)
        #[arg(long, default_value = "")]
        url: String,
    },
}

//! URL column detection: explicit name, exact "Profile", fuzzy keyword, then column B

use std::fmt;

use tracing::{info, warn};

use crate::error::AppError;

const EXACT_NAME: &str = "profile";
const FUZZY_KEYWORDS: &[&str] = &["profile", "url", "link"];
const POSITIONAL_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnStrategy {
    Explicit,
    ExactName,
    FuzzyName,
    Positional,
}

impl fmt::Display for ColumnStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnStrategy::Explicit => "explicit --column",
            ColumnStrategy::ExactName => "exact name match",
            ColumnStrategy::FuzzyName => "fuzzy name match",
            ColumnStrategy::Positional => "positional (column B)",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnChoice {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) strategy: ColumnStrategy,
    /// Every header the fuzzy strategy would have accepted
    pub(crate) candidates: Vec<String>,
}

impl ColumnChoice {
    /// Spreadsheet letter for the column ("A", "B", ..., "AA")
    pub(crate) fn letter(&self) -> String {
        column_letter(self.index)
    }
}

pub(crate) fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn fuzzy_candidates(headers: &[String]) -> Vec<(usize, &String)> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let lower = h.trim().to_lowercase();
            FUZZY_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .collect()
}

/// `width` is the widest row of the sheet; positional fallback needs at least two columns.
pub(crate) fn detect_column(
    headers: &[String],
    width: usize,
    explicit: Option<&str>,
) -> Result<ColumnChoice, AppError> {
    let fuzzy = fuzzy_candidates(headers);
    let candidates: Vec<String> = fuzzy.iter().map(|(_, h)| (*h).clone()).collect();

    let choice = if let Some(wanted) = explicit {
        let wanted = wanted.trim();
        let index = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::ColumnNotFound {
                name: wanted.to_string(),
                available: headers
                    .iter()
                    .filter(|h| !h.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        (index, ColumnStrategy::Explicit)
    } else if let Some(index) = headers
        .iter()
        .position(|h| h.trim().to_lowercase() == EXACT_NAME)
    {
        (index, ColumnStrategy::ExactName)
    } else if let Some((index, _)) = fuzzy.first() {
        if fuzzy.len() > 1 {
            warn!(
                candidates = candidates.join(", "),
                "several columns look like URL columns, using the leftmost"
            );
        }
        (*index, ColumnStrategy::FuzzyName)
    } else if width.max(headers.len()) > POSITIONAL_INDEX {
        (POSITIONAL_INDEX, ColumnStrategy::Positional)
    } else {
        return Err(AppError::NoUrlColumn);
    };

    let (index, strategy) = choice;
    let name = headers.get(index).cloned().unwrap_or_default();
    info!(
        column = name.as_str(),
        letter = column_letter(index).as_str(),
        %strategy,
        "selected URL column"
    );
    Ok(ColumnChoice {
        index,
        name,
        strategy,
        candidates,
    })
}

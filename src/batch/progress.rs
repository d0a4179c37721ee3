use crate::core::BatchReport;

/// Progress reporting for a batch run. Frontends decide how to surface it.
pub(crate) trait Progress {
    /// Called once with the number of URLs selected for the run.
    fn begin(&mut self, _total: usize) {}

    /// Called before URL `index` (1-based) is checked.
    fn item(&mut self, _index: usize, _total: usize, _url: &str) {}

    /// Called at the end, complete or interrupted.
    fn finish(&mut self, _report: &BatchReport) {}
}

/// A no-op progress sink.
#[cfg(test)]
pub(crate) struct NullProgress;
#[cfg(test)]
impl Progress for NullProgress {}

/// "Checking 3/120: https://..." lines on stderr
pub(crate) struct StderrProgress {
    quiet: bool,
}

impl StderrProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Progress for StderrProgress {
    fn item(&mut self, index: usize, total: usize, url: &str) {
        if !self.quiet {
            eprintln!("Checking {index}/{total}: {url}");
        }
    }

    fn finish(&mut self, report: &BatchReport) {
        if self.quiet {
            return;
        }
        if report.interrupted {
            eprintln!(
                "Stopped after {}/{} URLs ({:.1}s)",
                report.rows.len(),
                report.planned,
                report.elapsed_ms / 1000.0
            );
        } else {
            eprintln!(
                "Finished {} URLs ({:.1}s)",
                report.rows.len(),
                report.elapsed_ms / 1000.0
            );
        }
    }
}

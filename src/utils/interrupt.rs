use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::warn;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Route Ctrl-C into a flag the batch driver polls. A second Ctrl-C exits at once.
pub(crate) fn install_interrupt_handler() -> &'static AtomicBool {
    let result = ctrlc::set_handler(|| {
        if INTERRUPTED.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        eprintln!("\nInterrupted, finishing with the rows collected so far (Ctrl-C again to abort)");
    });
    if let Err(e) = result {
        warn!(error = %e, "could not install Ctrl-C handler");
    }
    &INTERRUPTED
}

pub(crate) fn is_stopped(stop: &AtomicBool) -> bool {
    stop.load(Ordering::Relaxed)
}

/// Sleep for `duration` in short slices. Returns false if `stop` was raised meanwhile.
pub(crate) fn sleep_unless_stopped(duration: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if is_stopped(stop) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleeps_full_duration_when_not_stopped() {
        let stop = AtomicBool::new(false);
        let start = Instant::now();
        assert!(sleep_unless_stopped(Duration::from_millis(30), &stop));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn returns_early_when_stopped() {
        let stop = AtomicBool::new(true);
        let start = Instant::now();
        assert!(!sleep_unless_stopped(Duration::from_secs(10), &stop));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn zero_duration_returns_immediately() {
        let stop = AtomicBool::new(false);
        assert!(sleep_unless_stopped(Duration::ZERO, &stop));
    }
}

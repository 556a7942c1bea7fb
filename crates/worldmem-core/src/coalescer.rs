//! Rebuild coalescing.
//!
//! Rebuilding the engine's index reprocesses the entire accumulated corpus,
//! so its cost is global no matter which world triggered the write. The
//! coalescer collapses the per-write trigger stream into at most one granted
//! rebuild per window, process-wide.
//!
//! The check-and-advance of the watermark is a single atomic step under a
//! mutex: concurrent writers inside one window can never both observe
//! "window elapsed". A granted claim that turns out to fail (the rebuild
//! call itself errored) is released, restoring the previous watermark so the
//! next write retries instead of waiting out a full window.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Default coalescing window between granted rebuilds.
pub const DEFAULT_REBUILD_WINDOW: Duration = Duration::from_secs(30);

/// A granted rebuild slot.
///
/// Carries the watermark state needed to roll the grant back if the rebuild
/// does not complete.
#[derive(Debug)]
#[must_use = "a claim represents a granted rebuild; release it on failure"]
pub struct RebuildClaim {
    granted_at: Instant,
    previous: Option<Instant>,
}

/// Process-wide rebuild rate limiter.
#[derive(Debug)]
pub struct RebuildCoalescer {
    window: Duration,
    /// Timestamp of the last granted rebuild. `None` until the first grant,
    /// so the first write after startup always triggers a rebuild.
    last_granted: Mutex<Option<Instant>>,
}

impl RebuildCoalescer {
    /// Create a coalescer with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_granted: Mutex::new(None),
        }
    }

    /// The configured coalescing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Atomically decide whether a rebuild is due at `now`.
    ///
    /// Returns a claim and advances the watermark to `now` iff the window
    /// has elapsed since the last grant (or nothing was ever granted).
    /// Otherwise the watermark is untouched and `None` is returned.
    pub fn try_claim_at(&self, now: Instant) -> Option<RebuildClaim> {
        let mut last = self.lock();
        let due = match *last {
            None => true,
            Some(prev) => now.saturating_duration_since(prev) >= self.window,
        };
        if !due {
            return None;
        }
        let previous = *last;
        *last = Some(now);
        Some(RebuildClaim {
            granted_at: now,
            previous,
        })
    }

    /// Convenience wrapper over [`try_claim_at`](Self::try_claim_at) using
    /// the current time.
    pub fn try_claim(&self) -> Option<RebuildClaim> {
        self.try_claim_at(Instant::now())
    }

    /// Roll back a granted claim whose rebuild failed.
    ///
    /// Restores the watermark the claim replaced, unless a later claim has
    /// been granted since (its watermark must not be stomped).
    pub fn release(&self, claim: RebuildClaim) {
        let mut last = self.lock();
        if *last == Some(claim.granted_at) {
            *last = claim.previous;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        // The lock is only held for the check-and-swap; a poisoned guard
        // still holds a coherent watermark.
        match self.last_granted.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for RebuildCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_REBUILD_WINDOW)
    }
}

//! # Cooperative Cancellation
//!
//! Traversal operations (descendant trees, organization-wide transfer
//! detection) are bounded by the tenant's actual data, but a caller may
//! still want to abort a long walk. [`Cancellation`] combines an optional
//! deadline with a manual cancel flag; traversals call [`Cancellation::check`]
//! per visited node and abort with an error rather than returning a
//! silently-truncated result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::CancelledError;

/// A cheap, cloneable cancellation token.
///
/// Clones share the same cancel flag: cancelling any clone cancels the
/// operation. A token with neither flag nor deadline never fires.
#[derive(Debug, Clone)]
pub struct Cancellation {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
    started: Instant,
}

impl Cancellation {
    /// A token that never cancels.
    pub fn unbounded() -> Self {
        Self {
            flag: None,
            deadline: None,
            started: Instant::now(),
        }
    }

    /// A token that fires once `limit` has elapsed.
    pub fn with_deadline(limit: Duration) -> Self {
        let now = Instant::now();
        Self {
            flag: None,
            deadline: Some(now + limit),
            started: now,
        }
    }

    /// A token that fires when [`cancel`](Self::cancel) is called on any clone.
    pub fn manual() -> Self {
        Self {
            flag: Some(Arc::new(AtomicBool::new(false))),
            deadline: None,
            started: Instant::now(),
        }
    }

    /// Add a deadline to this token, keeping any manual flag.
    pub fn and_deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(self.started + limit);
        self
    }

    /// Signal cancellation. No-op on tokens without a manual flag.
    pub fn cancel(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Whether the token has been cancelled or its deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }

    /// Return an error once the token has fired.
    pub fn check(&self) -> Result<(), CancelledError> {
        if let Some(flag) = &self.flag {
            if flag.load(Ordering::Relaxed) {
                return Err(CancelledError::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(CancelledError::DeadlineExceeded {
                    elapsed_ms: self.started.elapsed().as_millis() as u64,
                });
            }
        }
        Ok(())
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_never_fires() {
        let token = Cancellation::unbounded();
        assert!(token.check().is_ok());
        token.cancel(); // no flag, no-op
        assert!(token.check().is_ok());
    }

    #[test]
    fn manual_cancel_fires_across_clones() {
        let token = Cancellation::manual();
        let clone = token.clone();
        assert!(clone.check().is_ok());
        token.cancel();
        assert!(matches!(clone.check(), Err(CancelledError::Cancelled)));
        assert!(clone.is_cancelled());
    }

    #[test]
    fn zero_deadline_fires_immediately() {
        let token = Cancellation::with_deadline(Duration::ZERO);
        assert!(matches!(
            token.check(),
            Err(CancelledError::DeadlineExceeded { .. })
        ));
    }

    #[test]
    fn generous_deadline_does_not_fire() {
        let token = Cancellation::with_deadline(Duration::from_secs(3600));
        assert!(token.check().is_ok());
    }

    #[test]
    fn manual_with_deadline_keeps_flag() {
        let token = Cancellation::manual().and_deadline(Duration::from_secs(3600));
        assert!(token.check().is_ok());
        token.cancel();
        assert!(matches!(token.check(), Err(CancelledError::Cancelled)));
    }
}

//! Cooperative cancellation (component J).
//!
//! A cheap, clonable handle shared across the coordinator and every
//! worker. Checked at least once per coordinator cycle and at least once
//! per worker batch; tripping it never aborts mid-instruction, only at
//! those boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A `Clone`-able cancellation flag. Cloning shares the same underlying
/// flag; tripping any clone trips all of them.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}

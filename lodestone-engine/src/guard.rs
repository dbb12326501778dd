//! Write-attribution guard.
//!
//! In hosts that wire the edit detector to their store, the engine's own
//! writes fire the same save hooks human edits do. While a suppression
//! scope is alive the detector knows a save is engine-originated and leaves
//! the edited flag alone.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared flag marking "the engine is writing right now".
///
/// Clones share the same state. Scopes nest, and each scope releases on
/// drop, so an early return inside a write path cannot leave suppression
/// stuck on.
#[derive(Debug, Clone, Default)]
pub struct SuppressionGuard {
    depth: Arc<AtomicUsize>,
}

impl SuppressionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a suppression scope.
    #[must_use = "suppression ends when the scope is dropped"]
    pub fn suppress(&self) -> SuppressionScope {
        self.depth.fetch_add(1, Ordering::SeqCst);
        SuppressionScope {
            guard: self.clone(),
        }
    }

    /// Whether any scope is currently alive.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }
}

/// RAII handle for one suppression scope.
#[derive(Debug)]
pub struct SuppressionScope {
    guard: SuppressionGuard,
}

impl Drop for SuppressionScope {
    fn drop(&mut self) {
        self.guard.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_guard_is_not_suppressed() {
        assert!(!SuppressionGuard::new().is_suppressed());
    }

    #[test]
    fn scope_suppresses_until_dropped() {
        let guard = SuppressionGuard::new();
        {
            let _scope = guard.suppress();
            assert!(guard.is_suppressed());
        }
        assert!(!guard.is_suppressed());
    }

    #[test]
    fn scopes_nest() {
        let guard = SuppressionGuard::new();
        let outer = guard.suppress();
        {
            let _inner = guard.suppress();
            assert!(guard.is_suppressed());
        }
        assert!(guard.is_suppressed());
        drop(outer);
        assert!(!guard.is_suppressed());
    }

    #[test]
    fn clones_share_state() {
        let guard = SuppressionGuard::new();
        let clone = guard.clone();
        let _scope = guard.suppress();
        assert!(clone.is_suppressed());
    }
}

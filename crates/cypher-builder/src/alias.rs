//! Alias allocation.
//!
//! Explicit aliases pass through untouched. Missing aliases are generated as
//! `<prefix><N>` from a counter shared by every handle cloned from the same
//! allocator, so generated aliases keep increasing across builders and
//! queries. [`AliasAllocator::global`] hands out the process-wide counter.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Default prefix for generated aliases
pub const DEFAULT_ALIAS_PREFIX: &str = "p";

static GLOBAL_COUNTER: Lazy<Arc<AtomicU64>> = Lazy::new(|| Arc::new(AtomicU64::new(0)));

/// Handle on a shared alias counter.
///
/// Cloning shares the counter. No collision checks are made: reusing an
/// explicit alias is how relationship endpoints refer back to nodes.
#[derive(Debug, Clone)]
pub struct AliasAllocator {
    counter: Arc<AtomicU64>,
    prefix: Arc<str>,
}

impl Default for AliasAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasAllocator {
    /// Allocator with its own counter starting at 0
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(0)),
            prefix: Arc::from(DEFAULT_ALIAS_PREFIX),
        }
    }

    /// Handle on the process-wide counter
    pub fn global() -> Self {
        Self {
            counter: Arc::clone(&GLOBAL_COUNTER),
            prefix: Arc::from(DEFAULT_ALIAS_PREFIX),
        }
    }

    /// Same counter, different prefix for generated aliases
    pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = Arc::from(prefix.as_ref());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve the alias for a pattern.
    ///
    /// `label` is only a hint for logging; generated aliases never depend on
    /// it. An empty explicit alias counts as missing.
    pub fn resolve(&self, label: &str, explicit: Option<&str>) -> String {
        match explicit {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => {
                let alias = self.next_alias();
                trace!(label, alias = %alias, "Generated alias");
                alias
            }
        }
    }

    /// Take the next generated alias
    pub fn next_alias(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }

    /// Counter value the next generated alias will use
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Reset the counter to 0 for every handle sharing it.
    ///
    /// Meant for tests that need deterministic generated aliases.
    pub fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }

    /// Whether two handles share a counter
    pub fn shares_counter_with(&self, other: &AliasAllocator) -> bool {
        Arc::ptr_eq(&self.counter, &other.counter)
    }
}

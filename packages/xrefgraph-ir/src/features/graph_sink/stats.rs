//! Run counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub(crate) struct SinkCounters {
    pub files: AtomicU64,
    pub symbols: AtomicU64,
    pub references: AtomicU64,
    pub errors: AtomicU64,
}

impl SinkCounters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IndexStats {
        IndexStats {
            files: self.files.load(Ordering::Relaxed),
            symbols: self.symbols.load(Ordering::Relaxed),
            references: self.references.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            elapsed: Duration::ZERO,
        }
    }
}

/// Summary of an indexing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub files: u64,
    pub symbols: u64,
    pub references: u64,
    pub errors: u64,
    pub elapsed: Duration,
}

impl IndexStats {
    /// Same counts, ignoring elapsed time
    pub fn same_counts(&self, other: &IndexStats) -> bool {
        (self.files, self.symbols, self.references, self.errors)
            == (other.files, other.symbols, other.references, other.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_bumps() {
        let counters = SinkCounters::default();
        SinkCounters::bump(&counters.symbols);
        SinkCounters::bump(&counters.symbols);
        SinkCounters::bump(&counters.errors);

        let stats = counters.snapshot();
        assert_eq!(stats.symbols, 2);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.references, 0);
    }

    #[test]
    fn test_same_counts_ignores_elapsed() {
        let a = IndexStats {
            files: 1,
            elapsed: Duration::from_millis(5),
            ..Default::default()
        };
        let b = IndexStats {
            files: 1,
            elapsed: Duration::from_millis(9),
            ..Default::default()
        };
        assert!(a.same_counts(&b));
        assert_ne!(a, b);
    }
}

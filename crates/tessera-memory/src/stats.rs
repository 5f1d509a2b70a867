//! Arena usage counters.

use std::cell::Cell;

/// Snapshot of arena activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Successful reservations.
    pub allocations: u64,
    /// Blocks handed back, whether or not space was reclaimed.
    pub deallocations: u64,
    /// Deallocations that moved the cursor back.
    pub rollbacks: u64,
    /// Reservations refused for lack of space.
    pub failures: u64,
}

/// Interior-mutable counters owned by an arena.
#[derive(Debug, Default)]
pub struct ArenaCounters {
    allocations: Cell<u64>,
    deallocations: Cell<u64>,
    rollbacks: Cell<u64>,
    failures: Cell<u64>,
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

impl ArenaCounters {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a snapshot of the current counts.
    #[must_use]
    pub fn snapshot(&self) -> ArenaStats {
        ArenaStats {
            allocations: self.allocations.get(),
            deallocations: self.deallocations.get(),
            rollbacks: self.rollbacks.get(),
            failures: self.failures.get(),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.allocations.set(0);
        self.deallocations.set(0);
        self.rollbacks.set(0);
        self.failures.set(0);
    }

    /// Count a successful reservation.
    pub fn record_allocation(&self) {
        bump(&self.allocations);
    }

    /// Count a returned block.
    pub fn record_deallocation(&self) {
        bump(&self.deallocations);
    }

    /// Count a cursor rollback.
    pub fn record_rollback(&self) {
        bump(&self.rollbacks);
    }

    /// Count a refused reservation.
    pub fn record_failure(&self) {
        bump(&self.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counters_are_zeroed() {
        assert_eq!(ArenaCounters::new().snapshot(), ArenaStats::default());
    }

    #[test]
    fn record_and_snapshot() {
        let counters = ArenaCounters::new();
        counters.record_allocation();
        counters.record_allocation();
        counters.record_deallocation();
        counters.record_rollback();
        counters.record_failure();
        counters.record_failure();
        counters.record_failure();
        assert_eq!(
            counters.snapshot(),
            ArenaStats {
                allocations: 2,
                deallocations: 1,
                rollbacks: 1,
                failures: 3,
            }
        );
    }

    #[test]
    fn reset_clears_counters() {
        let counters = ArenaCounters::new();
        counters.record_allocation();
        counters.record_failure();
        counters.reset();
        assert_eq!(counters.snapshot(), ArenaStats::default());
    }
}

//! Nullable clock: deterministic time for testing.

use docgov_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for driving ballot windows in tests.
///
/// Time only moves when told to; every mutator returns the new reading so a
/// test can pass it straight into an engine call.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn at(start: Timestamp) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: u64) -> Timestamp {
        self.current.set(self.current.get().plus_secs(secs));
        self.current.get()
    }

    /// Jump to one second after `deadline`, the first instant it counts as passed.
    pub fn pass(&self, deadline: Timestamp) -> Timestamp {
        self.current.set(deadline.plus_secs(1));
        self.current.get()
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::at(Timestamp::new(1_700_000_000))
    }
}

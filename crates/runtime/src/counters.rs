use std::collections::BTreeMap;

/// Viewer activity that is worth counting.
///
/// Declaration order is the snapshot order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Counter {
    SearchSkipped,
    SearchDispatched,
    SearchNoMatch,
    SearchFailed,
    Recentered,
    NearbyIssued,
    NearbyApplied,
    NearbyStale,
}

impl Counter {
    pub fn name(self) -> &'static str {
        match self {
            Counter::SearchSkipped => "search.skipped",
            Counter::SearchDispatched => "search.dispatched",
            Counter::SearchNoMatch => "search.no_match",
            Counter::SearchFailed => "search.failed",
            Counter::Recentered => "viewport.recentered",
            Counter::NearbyIssued => "nearby.issued",
            Counter::NearbyApplied => "nearby.applied",
            Counter::NearbyStale => "nearby.stale",
        }
    }
}

/// Deterministic activity counters.
///
/// Backed by a sorted map so snapshots have stable ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counters {
    counts: BTreeMap<Counter, u64>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc(&mut self, counter: Counter) {
        *self.counts.entry(counter).or_insert(0) += 1;
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.counts.get(&counter).copied().unwrap_or(0)
    }

    /// Non-zero counters in declaration order, suitable for logs.
    pub fn snapshot(&self) -> Vec<(&'static str, u64)> {
        self.counts.iter().map(|(k, v)| (k.name(), *v)).collect()
    }
}

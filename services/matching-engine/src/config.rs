//! Engine configuration

/// Configuration for an [`Orderbook`](crate::Orderbook)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Sequence number carried by the first trade.
    pub starting_sequence: u64,
    /// Audit every book invariant after each operation (debug builds only).
    pub verify_invariants: bool,
    /// Upper bound on levels returned by depth queries.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_sequence: 1,
            verify_invariants: cfg!(debug_assertions),
            max_depth: 50,
        }
    }
}

//! Consumed-triple ledger

use crate::rdf::Triple;
use rustc_hash::FxHashSet;

/// Set of triples already folded into an axiom. It only ever grows.
#[derive(Debug, Clone, Default)]
pub struct ConsumedLedger {
    consumed: FxHashSet<Triple>,
}

impl ConsumedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a triple as consumed. Returns false if it already was;
    /// re-insertion changes nothing.
    pub fn consume(&mut self, triple: Triple) -> bool {
        self.consumed.insert(triple)
    }

    pub fn is_consumed(&self, triple: &Triple) -> bool {
        self.consumed.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}

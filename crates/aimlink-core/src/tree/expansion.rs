//! Expansion State
//!
//! Client-only expanded/collapsed flags keyed by node id. Nodes without an
//! explicit flag use the depth default: the root starts expanded, everything
//! below starts collapsed.

use std::collections::HashMap;

use crate::domain::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: HashMap<NodeId, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn default_for(depth: usize) -> bool {
        depth == 0
    }

    pub fn is_expanded(&self, id: &NodeId, depth: usize) -> bool {
        self.flags.get(id).copied().unwrap_or_else(|| Self::default_for(depth))
    }

    /// Flip one node's flag, returning the new value
    pub fn toggle(&mut self, id: &NodeId, depth: usize) -> bool {
        let expanded = !self.is_expanded(id, depth);
        self.flags.insert(id.clone(), expanded);
        expanded
    }

    /// Drop every explicit flag (used when a new tree arrives)
    pub fn reset(&mut self) {
        self.flags.clear();
    }
}

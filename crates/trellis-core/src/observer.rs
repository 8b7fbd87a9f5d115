use crate::collections::map::{HashMap, HashSet};
use crate::collections::OrderedSet;
use crate::state::StateId;
use smallvec::SmallVec;
use std::hash::Hash;

/// Records which observable values each scope read during its latest run and
/// answers which scopes a set of changes invalidates.
///
/// A scope is whatever unit of work re-runs when its inputs change; the layout
/// tree uses `(NodeId, Phase)` so that measure readers and placement readers are
/// invalidated independently.
pub struct StateObserver<S> {
    reads_by_scope: HashMap<S, SmallVec<[StateId; 4]>>,
    scopes_by_state: HashMap<StateId, HashSet<S>>,
}

impl<S: Copy + Eq + Hash> StateObserver<S> {
    pub fn new() -> Self {
        Self {
            reads_by_scope: HashMap::default(),
            scopes_by_state: HashMap::default(),
        }
    }

    /// Forgets the reads previously recorded for `scope`. Called before the scope
    /// re-runs so stale dependencies do not survive.
    pub fn begin(&mut self, scope: S) {
        self.clear(scope);
    }

    pub fn record(&mut self, scope: S, state: StateId) {
        let reads = self.reads_by_scope.entry(scope).or_default();
        if reads.contains(&state) {
            return;
        }
        reads.push(state);
        self.scopes_by_state.entry(state).or_default().insert(scope);
    }

    pub fn clear(&mut self, scope: S) {
        let Some(reads) = self.reads_by_scope.remove(&scope) else {
            return;
        };
        for state in reads {
            if let Some(scopes) = self.scopes_by_state.get_mut(&state) {
                scopes.remove(&scope);
                if scopes.is_empty() {
                    self.scopes_by_state.remove(&state);
                }
            }
        }
    }

    /// Drops every scope matching `predicate`, e.g. all phases of a disposed node.
    pub fn clear_if(&mut self, predicate: impl Fn(&S) -> bool) {
        let doomed: Vec<S> = self
            .reads_by_scope
            .keys()
            .filter(|scope| predicate(scope))
            .copied()
            .collect();
        for scope in doomed {
            self.clear(scope);
        }
    }

    /// Scopes that read any of `changed`, each reported once, in change order.
    pub fn invalidated_by(&self, changed: &[StateId]) -> Vec<S> {
        let mut invalidated: OrderedSet<S> = OrderedSet::default();
        for state in changed {
            if let Some(scopes) = self.scopes_by_state.get(state) {
                invalidated.extend(scopes.iter().copied());
            }
        }
        invalidated.into_iter().collect()
    }

    pub fn observed_scope_count(&self) -> usize {
        self.reads_by_scope.len()
    }
}

impl<S: Copy + Eq + Hash> Default for StateObserver<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/observer_tests.rs"]
mod tests;

//! Tabular action-value store
//!
//! Entries are created lazily on first visit and never pruned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Agent action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Stay = 0,
    Jump = 1,
}

impl Action {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Discretized (distance to next pipe, offset to its gap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    pub dx: i32,
    pub dy: i32,
}

/// One serialized row of the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QEntry {
    pub key: [i32; 2],
    pub values: [f64; 2],
}

/// Expected return for {stay, jump} per visited state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<QEntry>", into = "Vec<QEntry>")]
pub struct QTable {
    values: HashMap<StateKey, [f64; 2]>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: StateKey) -> Option<&[f64; 2]> {
        self.values.get(&key)
    }

    /// Insert `[0, 0]` for a state seen for the first time
    pub fn ensure(&mut self, key: StateKey) {
        self.values.entry(key).or_insert([0.0; 2]);
    }

    /// Best known value of a state
    pub fn max_value(&self, key: StateKey) -> Option<f64> {
        self.values.get(&key).map(|v| v[0].max(v[1]))
    }

    /// Action with the higher estimate; ties stay
    pub fn greedy(&self, key: StateKey) -> Option<Action> {
        self.values
            .get(&key)
            .map(|v| if v[1] > v[0] { Action::Jump } else { Action::Stay })
    }

    /// `Q[s][a] <- (1 - alpha) * Q[s][a] + alpha * (reward + gamma * max Q[next])`
    ///
    /// Both states must already be present; returns the new value if updated.
    pub fn update(
        &mut self,
        state: StateKey,
        action: Action,
        next: StateKey,
        reward: f64,
        alpha: f64,
        gamma: f64,
    ) -> Option<f64> {
        let best_next = self.max_value(next)?;
        let q = self.values.get_mut(&state)?;
        let slot = &mut q[action.index()];
        *slot = (1.0 - alpha) * *slot + alpha * (reward + gamma * best_next);
        Some(*slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &[f64; 2])> {
        self.values.iter()
    }
}

impl From<Vec<QEntry>> for QTable {
    fn from(entries: Vec<QEntry>) -> Self {
        let values = entries
            .into_iter()
            .map(|e| {
                (
                    StateKey {
                        dx: e.key[0],
                        dy: e.key[1],
                    },
                    e.values,
                )
            })
            .collect();
        Self { values }
    }
}

impl From<QTable> for Vec<QEntry> {
    fn from(table: QTable) -> Self {
        let mut entries: Vec<QEntry> = table
            .values
            .into_iter()
            .map(|(k, values)| QEntry {
                key: [k.dx, k.dy],
                values,
            })
            .collect();
        // Stable output for diffing saved tables
        entries.sort_by_key(|e| e.key);
        entries
    }
}

//! Undo Manager: bounded stack of full-state snapshots.

use crate::models::{Event, Product};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of snapshots kept.
pub const UNDO_DEPTH: usize = 10;

/// Deep copy of the live state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: Vec<Product>,
    #[serde(default)]
    pub events: Vec<Event>,
    /// Milliseconds since the Unix epoch.
    pub t: i64,
}

impl Snapshot {
    pub fn capture(products: &[Product], events: &[Event]) -> Self {
        Self {
            state: products.to_vec(),
            events: events.to_vec(),
            t: Utc::now().timestamp_millis(),
        }
    }
}

/// Linear, undo-only history. Pushing past capacity drops the oldest entry.
#[derive(Debug, Clone)]
pub struct UndoManager {
    stack: VecDeque<Snapshot>,
    depth: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::with_depth(UNDO_DEPTH)
    }
}

impl UndoManager {
    pub fn with_depth(depth: usize) -> Self {
        Self {
            stack: VecDeque::with_capacity(depth + 1),
            depth,
        }
    }

    /// Rebuild from persisted snapshots (oldest first), keeping the newest
    /// `depth` of them.
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> Self {
        let mut mgr = Self::default();
        for s in snapshots {
            mgr.push(s);
        }
        mgr
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.stack.push_back(snapshot);
        while self.stack.len() > self.depth {
            self.stack.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop_back()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.stack.iter()
    }
}

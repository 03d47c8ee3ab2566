//! The live warehouse state for one session.

use crate::core::commit::{CommitOptions, CommitReport};
use crate::core::grid::GridIndex;
use crate::core::normalize::normalize_records;
use crate::core::undo::{Snapshot, UndoManager};
use crate::db::kv::KeyValueStore;
use crate::db::repository;
use crate::errors::{AppError, AppResult};
use crate::models::{Cell, Event, EventKind, Product};

/// Products, event log, grid index and undo history, plus the storage they
/// are committed to. One instance per running session.
pub struct WarehouseStore<S: KeyValueStore> {
    pub(super) products: Vec<Product>,
    pub(super) events: Vec<Event>,
    pub(super) grid: GridIndex,
    pub(super) undo: UndoManager,
    pub(super) storage: S,
    pub(super) last_commit: Option<CommitReport>,
}

impl<S: KeyValueStore> WarehouseStore<S> {
    /// Load everything from `storage` and run an initial commit.
    ///
    /// Unreadable records load as empty; the failure is logged.
    pub fn open(mut storage: S) -> Self {
        let raw = repository::load_products(&mut storage).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load products, starting empty");
            Vec::new()
        });
        let events = repository::load_events(&mut storage).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load event log, starting empty");
            Vec::new()
        });
        let history = repository::load_undo(&mut storage).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load undo history, starting empty");
            Vec::new()
        });

        let mut store = Self {
            products: normalize_records(&raw),
            events,
            grid: GridIndex::default(),
            undo: UndoManager::from_snapshots(history),
            storage,
            last_commit: None,
        };
        store.commit(CommitOptions::default());
        store
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Report of the most recent commit, if any ran.
    pub fn last_commit(&self) -> Option<&CommitReport> {
        self.last_commit.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_at(&self, cell: Cell) -> Option<&Product> {
        self.grid.lookup(&self.products, cell)
    }

    pub fn count_occupied(&self) -> usize {
        self.grid.count()
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve_id(&self, needle: &str) -> AppResult<String> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(AppError::ProductNotFound(needle.to_string()));
        }
        if self.get(needle).is_some() {
            return Ok(needle.to_string());
        }

        let mut matches = self.products.iter().filter(|p| p.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(p), None) => Ok(p.id.clone()),
            (Some(_), Some(_)) => Err(AppError::AmbiguousId(needle.to_string())),
            (None, _) => Err(AppError::ProductNotFound(needle.to_string())),
        }
    }

    pub(super) fn index_of(&self, id: &str) -> AppResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::ProductNotFound(id.to_string()))
    }

    /// Push a deep copy of the current products and events onto the undo stack.
    pub fn snapshot(&mut self) {
        self.undo.push(Snapshot::capture(&self.products, &self.events));
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Restore the most recent snapshot and commit it, events included.
    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(last) = self.undo.pop() else {
            return false;
        };
        self.products = last.state;
        self.events = last.events;
        self.commit(CommitOptions::with_events());
        true
    }

    /// Append an event for `product`; it is persisted by the next commit
    /// that includes events.
    pub(super) fn log_event(&mut self, kind: EventKind, product: &Product) {
        self.events.push(Event::record(kind, product));
    }
}

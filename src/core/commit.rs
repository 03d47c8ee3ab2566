//! Commit Pipeline: sanitize, rebuild the grid index, persist.

use crate::core::grid::GridIndex;
use crate::core::sanitize::{SanitizeReport, sanitize_grid_placements};
use crate::core::store::WarehouseStore;
use crate::db::kv::KeyValueStore;
use crate::db::repository;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommitOptions {
    pub also_persist_events: bool,
}

impl CommitOptions {
    pub fn with_events() -> Self {
        Self {
            also_persist_events: true,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub sanitized: SanitizeReport,
    /// Occupied cells after the rebuild.
    pub occupied: usize,
    /// `false` when any write to storage failed.
    pub persisted: bool,
}

impl<S: KeyValueStore> WarehouseStore<S> {
    /// The only path to durable state.
    ///
    /// Storage failures are logged and reported in the returned
    /// [`CommitReport`]; they never abort the commit. The in-memory state
    /// stays authoritative for the rest of the session.
    pub fn commit(&mut self, opts: CommitOptions) -> CommitReport {
        let sanitized = sanitize_grid_placements(&mut self.products);
        if sanitized.demoted() > 0 {
            tracing::debug!(demoted = sanitized.demoted(), "sanitizer demoted placements");
        }

        self.grid = GridIndex::rebuild(&self.products);
        tracing::debug!(occupied = self.grid.count(), "grid index rebuilt");

        let mut persisted = true;

        if let Err(e) = repository::save_products(&mut self.storage, &self.products) {
            tracing::warn!(error = %e, "failed to persist products");
            persisted = false;
        }

        if opts.also_persist_events
            && let Err(e) = repository::save_events(&mut self.storage, &self.events)
        {
            tracing::warn!(error = %e, "failed to persist event log");
            persisted = false;
        }

        if let Err(e) = repository::save_undo(&mut self.storage, self.undo.iter()) {
            tracing::warn!(error = %e, "failed to persist undo history");
            persisted = false;
        }

        let report = CommitReport {
            sanitized,
            occupied: self.grid.count(),
            persisted,
        };
        self.last_commit = Some(report.clone());
        report
    }
}

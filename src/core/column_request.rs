//! Request/response channel for the interactive "choose a column" step.
//!
//! Only the latest request can be answered: issuing a new one silently
//! abandons any request still pending, and each request resolves once.

use crate::models::cell::is_valid_column;

/// Handle for one outstanding column choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRequest {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChoice {
    Chosen(i64),
    Cancelled,
    /// The request was superseded or already answered.
    Stale,
}

/// Single-slot mailbox keyed by a generation counter.
#[derive(Debug, Default)]
pub struct ColumnRequests {
    generation: u64,
    pending: Option<u64>,
}

impl ColumnRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new request, invalidating the previous one if unresolved.
    pub fn issue(&mut self) -> ColumnRequest {
        self.generation += 1;
        if let Some(old) = self.pending.replace(self.generation) {
            tracing::debug!(abandoned = old, "column request superseded");
        }
        ColumnRequest {
            generation: self.generation,
        }
    }

    pub fn is_pending(&self, request: &ColumnRequest) -> bool {
        self.pending == Some(request.generation)
    }

    /// Answer `request` with the operator's pick (`None` = cancel).
    /// Columns outside the grid count as a cancellation.
    pub fn resolve(&mut self, request: ColumnRequest, choice: Option<i64>) -> ColumnChoice {
        if !self.is_pending(&request) {
            return ColumnChoice::Stale;
        }
        self.pending = None;
        match choice {
            Some(col) if is_valid_column(col) => ColumnChoice::Chosen(col),
            _ => ColumnChoice::Cancelled,
        }
    }
}

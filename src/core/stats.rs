//! Aggregate statistics over products and the event log.

use crate::core::expiry::{ExpiryClass, dwell_days, expiry_status};
use crate::models::{Event, EventKind, Product};
use chrono::{DateTime, Local};
use std::collections::{BTreeMap, HashMap};

/// How many names each "top" ranking keeps.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: usize,
    /// Non-picking products occupying a cell.
    pub placed: usize,
    pub unplaced: usize,
    pub picking: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WarehouseStats {
    pub totals: Totals,
    pub top_added: Vec<(String, usize)>,
    pub top_removed: Vec<(String, usize)>,
    /// Rounded average dwell in days, `None` when no product has a date.
    pub avg_dwell_days: Option<i64>,
    /// Non-picking products grouped by expiry class, in list order.
    pub expiry_buckets: BTreeMap<ExpiryClass, Vec<Product>>,
}

pub struct StatsLogic;

impl StatsLogic {
    pub fn compute(products: &[Product], events: &[Event], now: DateTime<Local>) -> WarehouseStats {
        WarehouseStats {
            totals: Self::totals(products),
            top_added: Self::top(events, EventKind::Add),
            top_removed: Self::top(events, EventKind::Remove),
            avg_dwell_days: Self::average_dwell(products, now),
            expiry_buckets: Self::expiry_buckets(products, now),
        }
    }

    pub fn totals(products: &[Product]) -> Totals {
        let total = products.len();
        let picking = products.iter().filter(|p| p.in_picking()).count();
        let placed = products.iter().filter(|p| p.cell().is_some()).count();
        Totals {
            total,
            placed,
            unplaced: total - placed,
            picking,
        }
    }

    /// Most frequent trimmed names among events of `kind`, count descending.
    /// Equal counts keep first-seen order.
    pub fn top(events: &[Event], kind: EventKind) -> Vec<(String, usize)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for ev in events.iter().filter(|e| e.kind == kind) {
            let name = ev.name.trim();
            if name.is_empty() {
                continue;
            }
            let n = counts.entry(name.to_string()).or_insert(0);
            if *n == 0 {
                order.push(name.to_string());
            }
            *n += 1;
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|name| {
                let n = counts[&name];
                (name, n)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(TOP_N);
        ranked
    }

    pub fn average_dwell(products: &[Product], now: DateTime<Local>) -> Option<i64> {
        let days: Vec<i64> = products
            .iter()
            .filter_map(|p| dwell_days(&p.lot, &p.expiry_text, &p.date_added, now))
            .collect();
        if days.is_empty() {
            return None;
        }
        let avg = days.iter().sum::<i64>() as f64 / days.len() as f64;
        Some(avg.round() as i64)
    }

    pub fn expiry_buckets(
        products: &[Product],
        now: DateTime<Local>,
    ) -> BTreeMap<ExpiryClass, Vec<Product>> {
        let mut buckets: BTreeMap<ExpiryClass, Vec<Product>> = BTreeMap::new();
        for p in products.iter().filter(|p| !p.in_picking()) {
            if let Some(status) = expiry_status(&p.expiry_text, now) {
                buckets.entry(status.class).or_default().push(p.clone());
            }
        }
        buckets
    }
}

use super::cell::Cell;
use super::placement::Placement;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical item tracked by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ProductRecord", from = "ProductRecord")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub lot: String,
    pub date_added: String, // ISO-8601, set once at creation
    pub expiry_text: String,
    pub placement: Placement,
}

impl Product {
    /// New unplaced product with a fresh id and the current timestamp.
    pub fn new(name: &str, lot: &str, expiry_text: &str) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            lot: lot.to_string(),
            date_added: now_iso(),
            expiry_text: expiry_text.to_string(),
            placement: Placement::Unplaced,
        }
    }

    /// New product directly occupying `cell`.
    pub fn new_at(cell: Cell, name: &str, lot: &str, expiry_text: &str) -> Self {
        Self {
            placement: Placement::Placed(cell),
            ..Self::new(name, lot, expiry_text)
        }
    }

    pub fn cell(&self) -> Option<Cell> {
        self.placement.cell()
    }

    pub fn in_picking(&self) -> bool {
        self.placement.is_picking()
    }

    /// Name used for picking-conflict detection.
    pub fn key_name(&self) -> &str {
        self.name.trim()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "(no description)"
        } else {
            &self.name
        }
    }

    /// Parsed `date_added`, or `None` when the stored text is not a date.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date_added)
    }
}

/// Opaque unique identifier for a new product.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current instant formatted like `2025-06-18T09:12:44.120Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Lenient timestamp parsing: RFC 3339, then naive date-time, then plain date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

/// Persisted JSON shape of a product.
///
/// Optional coordinates are omitted rather than written as `null`, so files
/// exported by older versions and by this one look the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub date_added: String,
    #[serde(default)]
    pub expiry_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<i64>,
    #[serde(default)]
    pub in_prelievo: bool,
    #[serde(rename = "_prevRow", default, skip_serializing_if = "Option::is_none")]
    pub prev_row: Option<i64>,
    #[serde(rename = "_prevCol", default, skip_serializing_if = "Option::is_none")]
    pub prev_col: Option<i64>,
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        let (row, col, in_prelievo, prev) = match p.placement {
            Placement::Unplaced => (None, None, false, None),
            Placement::Placed(c) => (Some(c.row), Some(c.col), false, None),
            Placement::Picking { saved } => (None, None, true, saved),
        };
        Self {
            id: p.id,
            name: p.name,
            lot: p.lot,
            date_added: p.date_added,
            expiry_text: p.expiry_text,
            row,
            col,
            in_prelievo,
            prev_row: prev.map(|c| c.row),
            prev_col: prev.map(|c| c.col),
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        let placement = placement_from_parts(r.row, r.col, r.in_prelievo, r.prev_row, r.prev_col);
        Self {
            id: r.id,
            name: r.name,
            lot: r.lot,
            date_added: r.date_added,
            expiry_text: r.expiry_text,
            placement,
        }
    }
}

/// Fold the loose row/col/picking fields into a [`Placement`].
///
/// A lone `row` or `col` means unplaced; a picking record drops its live
/// coordinates and keeps only the saved pair.
pub fn placement_from_parts(
    row: Option<i64>,
    col: Option<i64>,
    in_prelievo: bool,
    prev_row: Option<i64>,
    prev_col: Option<i64>,
) -> Placement {
    if in_prelievo {
        let saved = match (prev_row, prev_col) {
            (Some(r), Some(c)) => Some(Cell::new(r, c)),
            _ => None,
        };
        return Placement::Picking { saved };
    }
    match (row, col) {
        (Some(r), Some(c)) => Placement::Placed(Cell::new(r, c)),
        _ => Placement::Unplaced,
    }
}

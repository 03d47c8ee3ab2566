// src/export/model.rs

use crate::models::Product;
use serde::Serialize;

/// One CSV row. Coordinates are 1-based and left empty when absent.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ProductExport {
    pub id: String,
    pub name: String,
    pub lot: String,
    #[serde(rename = "expiryText")]
    pub expiry_text: String,
    #[serde(rename = "dateAdded")]
    pub date_added: String,
    pub row: Option<i64>,
    pub col: Option<i64>,
    #[serde(rename = "inPrelievo")]
    pub in_prelievo: bool,
}

impl From<&Product> for ProductExport {
    fn from(p: &Product) -> Self {
        let cell = p.cell();
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            lot: p.lot.clone(),
            expiry_text: p.expiry_text.clone(),
            date_added: p.date_added.clone(),
            row: cell.map(|c| c.row + 1),
            col: cell.map(|c| c.col + 1),
            in_prelievo: p.in_picking(),
        }
    }
}

use super::product::Product;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Add,
    Edit,
    Remove,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Add => "add",
            EventKind::Edit => "edit",
            EventKind::Remove => "remove",
        }
    }
}

/// Immutable log entry, with the product fields as they were at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub expiry_text: String,
    /// Milliseconds since the Unix epoch.
    pub t: i64,
    #[serde(default)]
    pub date_added: Option<String>,
}

impl Event {
    pub fn record(kind: EventKind, product: &Product) -> Self {
        Self::record_at(kind, product, Utc::now().timestamp_millis())
    }

    pub fn record_at(kind: EventKind, product: &Product, t: i64) -> Self {
        let date_added = if product.date_added.is_empty() {
            None
        } else {
            Some(product.date_added.clone())
        };
        Self {
            kind,
            name: product.name.clone(),
            lot: product.lot.clone(),
            expiry_text: product.expiry_text.clone(),
            t,
            date_added,
        }
    }
}

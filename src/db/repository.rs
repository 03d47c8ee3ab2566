//! Persistence Adapter: reads and writes the warehouse records through a
//! [`KeyValueStore`].
//!
//! Loading is lenient (a missing or corrupt record reads as empty); saving
//! reports failures to the caller, which decides what to do with them.

use crate::core::undo::Snapshot;
use crate::db::kv::{EVENTS_KEY, KeyValueStore, LEGACY_PRODUCTS_KEYS, PRODUCTS_KEY, UNDO_KEY};
use crate::errors::PersistError;
use crate::models::{Event, Product};
use serde_json::Value;

/// Most recent events kept on every save.
pub const EVENT_CAP: usize = 5000;

/// Raw product records, untrusted until normalized.
///
/// The current key is tried first, then each legacy key. The first one
/// holding a JSON array wins and is rewritten under the current key; a
/// failed rewrite is logged and the records are returned anyway.
pub fn load_products(kv: &mut dyn KeyValueStore) -> Result<Vec<Value>, PersistError> {
    let keys = std::iter::once(PRODUCTS_KEY).chain(LEGACY_PRODUCTS_KEYS.iter().copied());

    for key in keys {
        let Some(raw) = kv.get(key)? else {
            continue;
        };
        let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&raw) else {
            tracing::warn!(key, "ignoring unreadable product record");
            continue;
        };
        if key != PRODUCTS_KEY {
            tracing::info!(from = key, to = PRODUCTS_KEY, "migrating legacy product list");
            if let Err(e) = kv.put(PRODUCTS_KEY, &raw) {
                tracing::warn!(error = %e, from = key, "could not rewrite legacy product list");
            }
        }
        return Ok(items);
    }

    Ok(Vec::new())
}

pub fn save_products(kv: &mut dyn KeyValueStore, products: &[Product]) -> Result<(), PersistError> {
    let json = serde_json::to_string(products)?;
    kv.put(PRODUCTS_KEY, &json)
}

/// Event log; entries that no longer parse are dropped.
pub fn load_events(kv: &mut dyn KeyValueStore) -> Result<Vec<Event>, PersistError> {
    let Some(raw) = kv.get(EVENTS_KEY)? else {
        return Ok(Vec::new());
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&raw) else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Event>(v).ok())
        .collect())
}

/// Writes only the most recent [`EVENT_CAP`] events.
pub fn save_events(kv: &mut dyn KeyValueStore, events: &[Event]) -> Result<(), PersistError> {
    let start = events.len().saturating_sub(EVENT_CAP);
    let json = serde_json::to_string(&events[start..])?;
    kv.put(EVENTS_KEY, &json)
}

/// Undo history, oldest first. A corrupt record reads as empty.
pub fn load_undo(kv: &mut dyn KeyValueStore) -> Result<Vec<Snapshot>, PersistError> {
    let Some(raw) = kv.get(UNDO_KEY)? else {
        return Ok(Vec::new());
    };
    Ok(serde_json::from_str(&raw).unwrap_or_default())
}

pub fn save_undo<'a, I>(kv: &mut dyn KeyValueStore, snapshots: I) -> Result<(), PersistError>
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let list: Vec<&Snapshot> = snapshots.into_iter().collect();
    let json = serde_json::to_string(&list)?;
    kv.put(UNDO_KEY, &json)
}

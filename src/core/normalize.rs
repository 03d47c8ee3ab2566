//! Product Normalizer: turns untrusted records (imports, stored data) into
//! canonical [`Product`]s. Never fails; bad fields fall back to defaults.

use crate::models::product::{new_id, now_iso, placement_from_parts};
use crate::models::Product;
use serde_json::{Map, Value};
use std::cmp::Reverse;

/// Normalize any JSON value. Anything other than an array yields no products.
pub fn normalize_products(raw: &Value) -> Vec<Product> {
    match raw {
        Value::Array(items) => normalize_records(items),
        _ => Vec::new(),
    }
}

/// Normalize a list of records, most recently added first.
///
/// Elements that are not JSON objects are skipped. Records without a
/// `dateAdded` all get the same timestamp, taken once per call. Records whose
/// `dateAdded` cannot be read as a date sort after all the others; the sort
/// is stable, so ties keep their input order.
pub fn normalize_records(items: &[Value]) -> Vec<Product> {
    let now = now_iso();
    let mut out: Vec<Product> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|rec| normalize_one(rec, &now))
        .collect();

    out.sort_by_key(|p| Reverse(p.added_at()));
    out
}

static NULL: Value = Value::Null;

fn field<'a>(rec: &'a Map<String, Value>, name: &str) -> &'a Value {
    rec.get(name).unwrap_or(&NULL)
}

fn normalize_one(rec: &Map<String, Value>, now: &str) -> Product {
    let expiry_text = match rec.get("expiryText") {
        Some(v) if !v.is_null() => text_of(v),
        _ => match rec.get("expiry") {
            Some(v) if !v.is_null() => text_of(v),
            _ => String::new(),
        },
    };

    let placement = placement_from_parts(
        as_integer(field(rec, "row")),
        as_integer(field(rec, "col")),
        is_truthy(field(rec, "inPrelievo")),
        as_integer(field(rec, "_prevRow")),
        as_integer(field(rec, "_prevCol")),
    );

    Product {
        id: truthy_text(field(rec, "id")).unwrap_or_else(new_id),
        name: truthy_text(field(rec, "name")).unwrap_or_default(),
        lot: truthy_text(field(rec, "lot")).unwrap_or_default(),
        date_added: truthy_text(field(rec, "dateAdded")).unwrap_or_else(|| now.to_string()),
        expiry_text,
        placement,
    }
}

/// Integer-valued JSON number (`2` and `2.0` both count), else `None`.
pub fn as_integer(v: &Value) -> Option<i64> {
    let Value::Number(n) = v else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Truthiness of a loosely-typed flag: `false`, `0`, `""` and `null` are false.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Scalar rendered as text; containers and `null` render empty.
fn text_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn truthy_text(v: &Value) -> Option<String> {
    if is_truthy(v) {
        Some(text_of(v)).filter(|s| !s.is_empty())
    } else {
        None
    }
}

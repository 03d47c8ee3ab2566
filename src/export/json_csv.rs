// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{ProductExport, notify_export_success};
use crate::models::Product;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON in the persisted product shape, so the file can be
/// imported back as is.
pub(crate) fn export_json(products: &[Product], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(products)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path, products.len());
    Ok(())
}

/// CSV with a header row, one line per product.
pub(crate) fn export_csv(products: &[Product], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for p in products {
        wtr.serialize(ProductExport::from(p))
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path, products.len());
    Ok(())
}

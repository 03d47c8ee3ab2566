// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::models::Product;
use crate::ui::messages::warning;
use chrono::{Local, NaiveDate};
use std::io::BufRead;
use std::path::PathBuf;

pub struct ExportLogic;

impl ExportLogic {
    /// `warehouse-YYYY-MM-DD.<ext>` in the current directory.
    pub fn default_file_name(format: ExportFormat, today: NaiveDate) -> String {
        format!("warehouse-{}.{}", today.format("%Y-%m-%d"), format.as_str())
    }

    /// Export the full product list.
    ///
    /// - `file`: output path; `None` → [`Self::default_file_name`] for today
    /// - `force`: overwrite an existing file without asking
    ///
    /// Returns the path written.
    pub fn export<R: BufRead>(
        products: &[Product],
        format: ExportFormat,
        file: Option<&str>,
        force: bool,
        input: &mut R,
    ) -> AppResult<PathBuf> {
        let path = match file {
            Some(f) => PathBuf::from(f),
            None => PathBuf::from(Self::default_file_name(format, Local::now().date_naive())),
        };

        ensure_writable(&path, force, input)?;

        if products.is_empty() {
            warning("The warehouse is empty: exporting an empty list.");
        }

        match format {
            ExportFormat::Json => export_json(products, &path)?,
            ExportFormat::Csv => export_csv(products, &path)?,
        }

        Ok(path)
    }
}

//! Spreadsheet export: one CSV row per record, fixed columns.

use std::path::Path;

use crate::error::{Result, ScanError};
use crate::models::LicenseRecord;

pub const HEADER: &str = "Package,License,Rating";

/// Render records as CSV, in input order.
pub fn to_csv(records: &[LicenseRecord]) -> String {
    let mut content = String::new();
    content.push_str(HEADER);
    content.push('\n');

    for record in records {
        content.push_str(&format!(
            "\"{}\",\"{}\",\"{}\"\n",
            escape_csv(&record.name),
            escape_csv(&record.license),
            record.rating
        ));
    }

    content
}

/// Write the CSV report to `path`, replacing any existing file.
pub fn write(records: &[LicenseRecord], path: &Path) -> Result<()> {
    std::fs::write(path, to_csv(records)).map_err(|source| ScanError::Export {
        path: path.to_path_buf(),
        source,
    })
}

fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\r', '\n'], " ")
}

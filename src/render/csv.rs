//! CSV export. Appends to an existing file so repeated runs accumulate;
//! the header is written only when the file is created.

use std::fs::OpenOptions;
use std::path::Path;

use crate::modules::catalog::CheckLevel;
use crate::modules::report::ReportRow;
use crate::render::table::{cells, columns};
use crate::shared::errors::AppResult;

pub fn export_csv(path: &Path, rows: &[ReportRow], level: CheckLevel) -> AppResult<()> {
    let exists = path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut writer = csv::Writer::from_writer(file);

    if !exists {
        writer.write_record(columns(level))?;
    }
    for row in rows {
        writer.write_record(cells(row, level))?;
    }
    writer.flush()?;
    Ok(())
}

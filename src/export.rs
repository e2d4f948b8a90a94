use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::report::{COLUMNS, Report};

const SHEET_NAME: &str = "IAM Roles";

/// Write the report as a single-sheet workbook, replacing any file at `path`
pub fn write(report: &Report, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, title) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (index, row) in report.rows().iter().enumerate() {
        let row_num =
            u32::try_from(index + 1).context("Report exceeds the worksheet row limit")?;
        for (col, cell) in (0u16..).zip(row.cells()) {
            worksheet
                .write_string(row_num, col, cell)
                .with_context(|| format!("Failed to write row {row_num} of {}", path.display()))?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook to {}", path.display()))?;

    info!("Wrote {} rows to {}", report.len(), path.display());
    Ok(())
}

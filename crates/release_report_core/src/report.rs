//! Spreadsheet export of a release report.
//!
//! The workbook has a single worksheet with a styled header row and one row per
//! entry. Column widths follow the longest value in each column, capped at
//! [`MAX_COLUMN_WIDTH`].

use ado_client::FileEntry;
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Workbook};

use crate::errors::ReportError;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Name of the worksheet holding the report.
pub const WORKSHEET_NAME: &str = "Release Scripts";

/// Header row, in column order.
pub const COLUMN_HEADERS: [&str; 6] = [
    "#",
    "File Name",
    "Full Path",
    "Added By",
    "Added On",
    "ADO URL",
];

/// Upper bound for a column width, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Extra characters added to the longest value of a column.
const COLUMN_PADDING: usize = 2;

const HEADER_BACKGROUND: u32 = 0x0078D4;

/// MIME type of the export artifact.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One report row as text, in [`COLUMN_HEADERS`] order. Indexes start at 1.
pub fn report_rows(entries: &[FileEntry]) -> Vec<[String; 6]> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            [
                (idx + 1).to_string(),
                entry.name.clone(),
                entry.path.clone(),
                entry.added_by.clone(),
                entry.added_date.clone(),
                entry.web_url.clone(),
            ]
        })
        .collect()
}

/// Width of every column: longest value (header included) plus padding, capped.
pub fn column_widths(rows: &[[String; 6]]) -> [usize; 6] {
    let mut widths = COLUMN_HEADERS.map(|header| header.chars().count());

    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.chars().count());
        }
    }

    widths.map(|width| (width + COLUMN_PADDING).min(MAX_COLUMN_WIDTH))
}

/// Renders `entries` as an `.xlsx` workbook.
///
/// `release` and `folder` only end up in the document properties; the sheet
/// content depends on the entries alone.
///
/// # Errors
///
/// Returns `ReportError::Workbook` if the workbook cannot be assembled.
pub fn build_export(
    entries: &[FileEntry],
    release: &str,
    folder: &str,
) -> Result<Vec<u8>, ReportError> {
    let rows = report_rows(entries);
    let widths = column_widths(&rows);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_BACKGROUND))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let mut workbook = Workbook::new();
    let properties = DocProperties::new()
        .set_title(&format!("Release {release} scripts"))
        .set_subject(folder);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (col, header) in COLUMN_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let sheet_row = idx as u32 + 1;
        worksheet.write_number(sheet_row, 0, (idx + 1) as f64)?;
        for (col, value) in row.iter().enumerate().skip(1) {
            worksheet.write_string(sheet_row, col as u16, value)?;
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// File name of the export for today's local date.
pub fn build_export_filename(release: &str, folder: &str) -> String {
    export_filename_for_date(release, folder, Local::now().date_naive())
}

/// File name of the export for `date`.
///
/// Path separators and underscores in the folder label become dashes.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use release_report_core::report::export_filename_for_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
/// assert_eq!(
///     export_filename_for_date("1.29.1", "de/noncost_2", date),
///     "Release_1.29.1_de-noncost-2_2024-02-14.xlsx"
/// );
/// ```
pub fn export_filename_for_date(release: &str, folder: &str, date: NaiveDate) -> String {
    let folder_label = folder.replace(['/', '\\', '_'], "-");
    format!(
        "Release_{release}_{folder_label}_{}.xlsx",
        date.format("%Y-%m-%d")
    )
}

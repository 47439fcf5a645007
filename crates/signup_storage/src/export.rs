//! Spreadsheet export of all registrations.

use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use signup_core::Registration;

use crate::repository::StorageResult;

const SHEET_NAME: &str = "Users";
const COLUMN_WIDTH: f64 = 22.0;
const ROW_HEIGHT: f64 = 20.0;
const HEADER_FONT_SIZE: f64 = 12.0;
/// The only column written as a number.
const COMPANIONS_COLUMN: u16 = 2;

pub const HEADERS: [&str; 8] = [
    "نام و نام خانوادگی",
    "شماره همراه",
    "تعداد همراه",
    "رشته",
    "کد دانشجویی",
    "شماره تراکنش بانکی",
    "نام کاربری ثبت کننده",
    "زمان ثبت",
];

/// Turns registrations into a file the admin can open in a spreadsheet.
pub trait ExportRenderer: Send + Sync {
    /// File name the export is delivered under.
    fn file_name(&self) -> &str;

    fn render(&self, registrations: &[Registration]) -> StorageResult<Vec<u8>>;
}

/// Cell values of one registration, in `HEADERS` order.
pub fn export_row(registration: &Registration) -> [String; 8] {
    [
        registration.full_name.clone(),
        registration.phone.clone(),
        registration.companion_count.to_string(),
        registration.major.as_str().to_string(),
        registration.student_id.clone(),
        registration.transaction_ref.clone(),
        registration.submitter_handle.clone().unwrap_or_default(),
        registration.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}

/// Single-sheet xlsx workbook laid out right to left, with a bold header row
/// and centered, wrapped cells.
#[derive(Debug, Clone)]
pub struct XlsxExportRenderer {
    file_name: String,
}

impl Default for XlsxExportRenderer {
    fn default() -> Self {
        Self::new("users_list.xlsx")
    }
}

impl XlsxExportRenderer {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl ExportRenderer for XlsxExportRenderer {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn render(&self, registrations: &[Registration]) -> StorageResult<Vec<u8>> {
        let cell_format = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        let header_format = cell_format
            .clone()
            .set_bold()
            .set_font_size(HEADER_FONT_SIZE);

        let mut workbook = Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(SHEET_NAME)?;
            sheet.set_right_to_left(true);

            for (col, header) in (0u16..).zip(HEADERS) {
                sheet.write_string_with_format(0, col, header, &header_format)?;
                sheet.set_column_width(col, COLUMN_WIDTH)?;
            }

            for (row, registration) in (1u32..).zip(registrations) {
                for (col, value) in (0u16..).zip(export_row(registration)) {
                    if col == COMPANIONS_COLUMN {
                        let count = f64::from(registration.companion_count);
                        sheet.write_number_with_format(row, col, count, &cell_format)?;
                    } else {
                        sheet.write_string_with_format(row, col, value, &cell_format)?;
                    }
                }
                sheet.set_row_height(row, ROW_HEIGHT)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

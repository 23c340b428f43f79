use crate::domain::model::{CellStyle, ExportCell, ExportSheet, ExportValue};
use crate::domain::ports::SheetEncoder;
use crate::utils::error::{MergeError, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

/// 以 rust_xlsxwriter 寫出單一工作表的 `.xlsx`
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

impl XlsxEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl SheetEncoder for XlsxEncoder {
    fn encode(&self, sheet: &ExportSheet) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.sheet_name.as_str())?;

        write_row(worksheet, 0, &sheet.header)?;
        for (index, row) in sheet.rows.iter().enumerate() {
            write_row(worksheet, row_index(index + 1)?, row)?;
        }

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(
            "Encoded worksheet '{}' ({} rows, {} bytes)",
            sheet.sheet_name,
            sheet.rows.len() + 1,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// 超出 xlsx 列數或欄數上限時回報為寫檔錯誤
fn row_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| MergeError::Encode(XlsxError::RowColumnLimitError))
}

fn col_index(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| MergeError::Encode(XlsxError::RowColumnLimitError))
}

fn format_for(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.align_right {
        format = format.set_align(FormatAlign::Right);
    }
    if let Some(num_format) = style.num_format {
        format = format.set_num_format(num_format);
    }
    format
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: &[ExportCell]) -> Result<()> {
    for (index, cell) in cells.iter().enumerate() {
        let col = col_index(index)?;

        if cell.style.is_plain() {
            match &cell.value {
                ExportValue::Empty => {}
                ExportValue::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                ExportValue::Text(s) => {
                    worksheet.write_string(row, col, s.as_str())?;
                }
            }
            continue;
        }

        let format = format_for(&cell.style);
        match &cell.value {
            ExportValue::Empty => {
                worksheet.write_blank(row, col, &format)?;
            }
            ExportValue::Number(n) => {
                worksheet.write_number_with_format(row, col, *n, &format)?;
            }
            ExportValue::Text(s) => {
                worksheet.write_string_with_format(row, col, s.as_str(), &format)?;
            }
        }
    }
    Ok(())
}

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

use crate::domain::entities::table::{CellValue, Table};
use crate::error::{MergeError, Result};
use crate::usecase::ports::codec::TabularCodec;

const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::Text(v.clone()),
        Data::Float(v) => CellValue::Float(*v),
        Data::Int(v) => CellValue::Int(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::DateTime(v.as_f64()),
        Data::DateTimeIso(v) => CellValue::Text(v.clone()),
        Data::DurationIso(v) => CellValue::Text(v.clone()),
        Data::Error(v) => CellValue::Error(v.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

fn encode_error(err: XlsxError) -> MergeError {
    MergeError::Encode(err.to_string())
}

/// `.xlsx` / `.xls` in through calamine, `.xlsx` out through rust_xlsxwriter.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxCodec;

impl TabularCodec for XlsxCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|err| MergeError::Decode(err.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| MergeError::Decode("workbook contains no sheets".to_string()))?
            .map_err(|err| MergeError::Decode(err.to_string()))?;

        Ok(Table::new(
            range
                .rows()
                .map(|r| r.iter().map(cell_to_value).collect())
                .collect(),
        ))
    }

    fn encode(&self, table: &Table, sheet_label: &str) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format(DATE_TIME_FORMAT);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_label).map_err(encode_error)?;

        for (row_idx, row) in table.rows().iter().enumerate() {
            let row_num = RowNum::try_from(row_idx)
                .map_err(|_| MergeError::Encode(format!("row {row_idx} is out of range")))?;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = ColNum::try_from(col_idx).map_err(|_| {
                    MergeError::Encode(format!("column {col_idx} in row {row_idx} is out of range"))
                })?;
                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(v) | CellValue::Error(v) => {
                        worksheet
                            .write_string(row_num, col_num, v)
                            .map_err(encode_error)?;
                    }
                    CellValue::Int(v) => {
                        worksheet
                            .write_number(row_num, col_num, *v as f64)
                            .map_err(encode_error)?;
                    }
                    CellValue::Float(v) => {
                        if !v.is_finite() {
                            return Err(MergeError::Encode(format!(
                                "non-finite number {v} at row {row_idx}, column {col_idx}"
                            )));
                        }
                        worksheet
                            .write_number(row_num, col_num, *v)
                            .map_err(encode_error)?;
                    }
                    CellValue::Bool(v) => {
                        worksheet
                            .write_boolean(row_num, col_num, *v)
                            .map_err(encode_error)?;
                    }
                    CellValue::DateTime(v) => {
                        worksheet
                            .write_number_with_format(row_num, col_num, *v, &date_format)
                            .map_err(encode_error)?;
                    }
                }
            }
        }

        workbook.save_to_buffer().map_err(encode_error)
    }
}

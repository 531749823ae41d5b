use crate::output::format::{OutputError, OutputResult};
use crate::record::{ProductRecord, RecordCollection, COLUMNS};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Writes a single-sheet workbook: header row, then one row per record
///
/// Price and review count are stored as numbers.
pub fn write_xlsx(records: &RecordCollection, path: &Path) -> OutputResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, &record.title)?;
        worksheet.write_string(row, 1, &record.description)?;
        worksheet.write_number(row, 2, record.price)?;
        worksheet.write_number(row, 3, record.review_count as f64)?;
        worksheet.write_string(row, 4, &record.image_url)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Reads the first sheet of a workbook written by [`write_xlsx`]
///
/// The header row must match the fixed column order. Row numbers in errors
/// are 1-based, as shown by spreadsheet applications.
pub fn read_xlsx(path: &Path) -> OutputResult<RecordCollection> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| malformed(1, "workbook has no sheets"))??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| malformed(1, "missing header row"))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    if header != COLUMNS {
        return Err(malformed(
            1,
            &format!("expected columns {:?}, got {:?}", COLUMNS, header),
        ));
    }

    rows.enumerate()
        .map(|(index, row)| parse_row(index + 2, row))
        .collect()
}

const EMPTY_CELL: &Data = &Data::Empty;

fn parse_row(row: usize, cells: &[Data]) -> OutputResult<ProductRecord> {
    let cell = |col: usize| cells.get(col).unwrap_or(EMPTY_CELL);

    let price = number(row, cell(2))?;
    let reviews = number(row, cell(3))?;
    if reviews < 0.0 || reviews.fract() != 0.0 {
        return Err(malformed(row, &format!("invalid review count {}", reviews)));
    }

    Ok(ProductRecord {
        title: text(cell(0)),
        description: text(cell(1)),
        price,
        review_count: reviews as u64,
        image_url: text(cell(4)),
    })
}

fn text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn number(row: usize, cell: &Data) -> OutputResult<f64> {
    match cell {
        Data::Float(value) => Ok(*value),
        Data::Int(value) => Ok(*value as f64),
        Data::String(s) => s
            .trim()
            .parse()
            .map_err(|_| malformed(row, &format!("expected a number, got {:?}", s))),
        other => Err(malformed(row, &format!("expected a number, got {:?}", other))),
    }
}

fn malformed(row: usize, message: &str) -> OutputError {
    OutputError::Malformed {
        row,
        message: message.to_string(),
    }
}

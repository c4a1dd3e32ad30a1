//! # Sheet Codec
//!
//! Reads and writes the inventory table (`SKU, Product_Name, Quantity, Price`)
//! as a spreadsheet. The format is picked from the file extension:
//!
//! - `.csv` goes through the `csv` crate
//! - everything else is read with `calamine` (xlsx, xlsm, xlsb, xls, ods)
//! - `.xlsx` and `.xlsm` are written with `rust_xlsxwriter`; other workbook
//!   extensions are read-only
//!
//! Reading validates the header before looking at any row, then converts every
//! row. A single bad row rejects the whole table so callers never see a
//! partially parsed batch.

use crate::error::{Result, StockError};
use crate::model::{ProductRecord, COLUMNS};
use calamine::{open_workbook_auto, Data, Reader};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const SHEET_NAME: &str = "Inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// Format for reading `path`. Non-csv files go to calamine, which picks
    /// its own parser and rejects extensions it does not know.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SheetFormat::Csv,
            _ => SheetFormat::Xlsx,
        }
    }

    /// Format for writing `path`.
    ///
    /// Only extensions whose bytes read back under the same name are allowed:
    /// `.csv`, `.xlsx` and `.xlsm`. An `.ods`, `.xls` or `.xlsb` path would get
    /// xlsx bytes that calamine then refuses to open.
    pub fn writable(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(SheetFormat::Csv),
            Some("xlsx" | "xlsm") => Ok(SheetFormat::Xlsx),
            _ => Err(StockError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A cell as it comes out of either source format.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => format_number(*n),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(n) => Cell::Number(*n),
            Data::Int(n) => Cell::Number(*n as f64),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// Integral floats print without a fraction so numeric SKUs read as `1001`, not `1001.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

struct ColumnMap {
    sku: usize,
    name: usize,
    quantity: usize,
    price: usize,
}

fn map_columns(header: &[Cell]) -> Result<ColumnMap> {
    let names: Vec<String> = header.iter().map(Cell::text).collect();
    let position = |column: &str| names.iter().position(|name| name == column);

    match COLUMNS.map(position) {
        [Some(sku), Some(name), Some(quantity), Some(price)] => Ok(ColumnMap {
            sku,
            name,
            quantity,
            price,
        }),
        found => {
            let missing = COLUMNS
                .iter()
                .zip(found)
                .filter(|(_, idx)| idx.is_none())
                .map(|(column, _)| column.to_string())
                .collect();
            Err(StockError::InvalidSchema { missing })
        }
    }
}

fn invalid(line: usize, message: impl std::fmt::Display) -> StockError {
    StockError::InvalidRecord(format!("row {}: {}", line, message))
}

fn parse_sku(cell: &Cell, line: usize) -> Result<String> {
    let sku = cell.text();
    if sku.is_empty() {
        return Err(invalid(line, "SKU is empty"));
    }
    Ok(sku)
}

fn parse_quantity(cell: &Cell, line: usize) -> Result<u32> {
    let n = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) if !s.trim().is_empty() => {
            let s = s.trim();
            if let Ok(q) = s.parse::<u32>() {
                return Ok(q);
            }
            s.parse::<f64>()
                .map_err(|_| invalid(line, format!("quantity '{}' is not a number", s)))?
        }
        _ => return Err(invalid(line, "quantity is empty")),
    };

    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(invalid(
            line,
            format!("quantity {} must be a whole number of at least 0", n),
        ));
    }
    Ok(n as u32)
}

/// Floats go through their shortest display form so `29.99` stays `29.99`.
fn decimal_from_f64(n: f64) -> Option<Decimal> {
    Decimal::from_str(&n.to_string()).ok()
}

fn parse_price(cell: &Cell, line: usize) -> Result<Decimal> {
    match cell {
        Cell::Number(n) => {
            decimal_from_f64(*n).ok_or_else(|| invalid(line, format!("price {} is out of range", n)))
        }
        Cell::Text(s) if !s.trim().is_empty() => {
            let cleaned = s.trim().trim_start_matches('$').replace(',', "");
            Decimal::from_str(cleaned.trim())
                .map_err(|_| invalid(line, format!("price '{}' is not a number", s.trim())))
        }
        _ => Err(invalid(line, "price is empty")),
    }
}

fn records_from_rows(header: &[Cell], rows: Vec<Vec<Cell>>) -> Result<Vec<ProductRecord>> {
    let columns = map_columns(header)?;
    let mut records = Vec::with_capacity(rows.len());

    for (offset, row) in rows.iter().enumerate() {
        // Spreadsheet row number: 1-based with the header on row 1.
        let line = offset + 2;
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY_CELL);

        let record = ProductRecord {
            sku: parse_sku(cell(columns.sku), line)?,
            name: cell(columns.name).text(),
            quantity: parse_quantity(cell(columns.quantity), line)?,
            price: parse_price(cell(columns.price), line)?,
        };
        record.validate().map_err(|e| invalid(line, e))?;
        records.push(record);
    }

    Ok(records)
}

fn split_header(rows: Vec<Vec<Cell>>) -> (Vec<Cell>, Vec<Vec<Cell>>) {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();
    (header, rows.collect())
}

fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Vec::new()),
    };
    Ok(range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

/// Read every product row from `path`.
///
/// Fails with `FileNotFound` when the path does not exist, `InvalidSchema`
/// when a required column is missing and `InvalidRecord` on the first bad row.
pub fn read_table(path: &Path) -> Result<Vec<ProductRecord>> {
    if !path.exists() {
        return Err(StockError::FileNotFound(path.to_path_buf()));
    }

    let format = SheetFormat::from_path(path);
    let rows = match format {
        SheetFormat::Xlsx => read_workbook_rows(path)?,
        SheetFormat::Csv => read_csv_rows(path)?,
    };
    let (header, rows) = split_header(rows);
    let records = records_from_rows(&header, rows)?;

    debug!(path = %path.display(), ?format, rows = records.len(), "read inventory sheet");
    Ok(records)
}

fn price_to_f64(record: &ProductRecord) -> Result<f64> {
    record.price.to_f64().ok_or_else(|| {
        StockError::InvalidRecord(format!(
            "price {} of '{}' cannot be written as a number",
            record.price, record.sku
        ))
    })
}

fn write_workbook(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let price_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string(row, 0, record.sku.as_str())?;
        worksheet.write_string(row, 1, record.name.as_str())?;
        worksheet.write_number(row, 2, f64::from(record.quantity))?;
        worksheet.write_number_with_format(row, 3, price_to_f64(record)?, &price_format)?;
    }
    worksheet.set_column_width(1, 28.0)?;

    workbook.save(path)?;
    Ok(())
}

fn write_csv(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record([
            record.sku.as_str(),
            record.name.as_str(),
            record.quantity.to_string().as_str(),
            record.price.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `records` to `path`, replacing whatever is there.
///
/// The parent directory must already exist and the extension must be one
/// [`SheetFormat::writable`] accepts.
pub fn write_table(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let format = SheetFormat::writable(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(StockError::FileNotFound(parent.to_path_buf()));
        }
    }

    match format {
        SheetFormat::Xlsx => write_workbook(path, records)?,
        SheetFormat::Csv => write_csv(path, records)?,
    }

    debug!(path = %path.display(), ?format, rows = records.len(), "wrote inventory sheet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample() -> Vec<ProductRecord> {
        vec![
            ProductRecord::new("SKU001", "Wireless Mouse", 50, dec("29.99")),
            ProductRecord::new("SKU002", "USB-C Cable", 100, dec("12.50")),
            ProductRecord::new("SKU003", "", 0, dec("0")),
        ]
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SheetFormat::from_path(Path::new("a.csv")), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_path(Path::new("a.CSV")), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_path(Path::new("a.xlsx")), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::from_path(Path::new("a")), SheetFormat::Xlsx);
    }

    #[test]
    fn only_round_trippable_extensions_are_writable() {
        assert_eq!(SheetFormat::writable(Path::new("a.CSV")).unwrap(), SheetFormat::Csv);
        assert_eq!(SheetFormat::writable(Path::new("a.xlsx")).unwrap(), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::writable(Path::new("a.xlsm")).unwrap(), SheetFormat::Xlsx);
        for name in ["a.ods", "a.xls", "a.xlsb", "a.txt", "a"] {
            assert!(matches!(
                SheetFormat::writable(Path::new(name)),
                Err(StockError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn read_only_formats_are_never_written() {
        let dir = TempDir::new().unwrap();
        for name in ["stock.ods", "stock.xls", "stock.xlsb"] {
            let path = dir.path().join(name);
            assert!(matches!(
                write_table(&path, &sample()),
                Err(StockError::UnsupportedFormat(p)) if p == path
            ));
            assert!(!path.exists(), "{} was created", name);
        }
    }

    #[test]
    fn xlsm_write_then_read_keeps_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.xlsm");

        write_table(&path, &sample()).unwrap();
        assert_eq!(read_table(&path).unwrap(), sample());
    }

    #[test]
    fn xlsx_write_then_read_keeps_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.xlsx");

        write_table(&path, &sample()).unwrap();
        let loaded = read_table(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn csv_write_then_read_keeps_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.csv");

        write_table(&path, &sample()).unwrap();
        let loaded = read_table(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn header_only_sheet_is_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");

        write_table(&path, &[]).unwrap();
        assert!(read_table(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.xlsx");
        assert!(matches!(read_table(&path), Err(StockError::FileNotFound(p)) if p == path));
    }

    #[test]
    fn missing_columns_are_named() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, "SKU,Product_Name,Quantity\nSKU001,Mouse,5\n").unwrap();

        match read_table(&path) {
            Err(StockError::InvalidSchema { missing }) => assert_eq!(missing, vec!["Price"]),
            other => panic!("expected InvalidSchema, got {:?}", other),
        }
    }

    #[test]
    fn extra_columns_and_column_order_do_not_matter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shuffled.csv");
        fs::write(
            &path,
            "Price,Supplier,SKU,Quantity,Product_Name\n$5.00,Acme,SKU999,10,New Item\n",
        )
        .unwrap();

        let records = read_table(&path).unwrap();
        assert_eq!(
            records,
            vec![ProductRecord::new("SKU999", "New Item", 10, dec("5.00"))]
        );
    }

    #[test]
    fn blank_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gaps.csv");
        fs::write(
            &path,
            "SKU,Product_Name,Quantity,Price\nA,One,1,1.00\n,,,\nB,Two,2,2.00\n",
        )
        .unwrap();

        let skus: Vec<_> = read_table(&path).unwrap().into_iter().map(|r| r.sku).collect();
        assert_eq!(skus, vec!["A", "B"]);
    }

    #[test]
    fn bad_quantity_names_the_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "SKU,Product_Name,Quantity,Price\nA,One,1,1.00\nB,Two,many,2.00\n",
        )
        .unwrap();

        match read_table(&path) {
            Err(StockError::InvalidRecord(msg)) => assert!(msg.starts_with("row 3:"), "{}", msg),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(parse_quantity(&Cell::Number(-1.0), 2).is_err());
        assert!(parse_quantity(&Cell::Number(2.5), 2).is_err());
        assert_eq!(parse_quantity(&Cell::Text("7".into()), 2).unwrap(), 7);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("neg.csv");
        fs::write(&path, "SKU,Product_Name,Quantity,Price\nA,One,1,-3.00\n").unwrap();
        assert!(matches!(read_table(&path), Err(StockError::InvalidRecord(_))));
    }

    #[test]
    fn numeric_cells_in_workbooks_are_converted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("numeric.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, title) in COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_number(1, 0, 1001.0).unwrap();
        sheet.write_string(1, 1, "Widget").unwrap();
        sheet.write_number(1, 2, 12.0).unwrap();
        sheet.write_number(1, 3, 45.0).unwrap();
        workbook.save(&path).unwrap();

        let records = read_table(&path).unwrap();
        assert_eq!(
            records,
            vec![ProductRecord::new("1001", "Widget", 12, dec("45"))]
        );
    }

    #[test]
    fn writing_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");
        assert!(matches!(
            write_table(&path, &sample()),
            Err(StockError::FileNotFound(_))
        ));
    }
}

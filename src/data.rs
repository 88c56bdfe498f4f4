//! Data loading, row filtering, and derived-column computation using Polars

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, DataType as CellValue, Reader, Xlsx};
use polars::prelude::*;
use thiserror::Error;

/// Errors recognized by the loader. Everything past format dispatch
/// (malformed cells, missing columns) propagates from the underlying
/// parser instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file format {extension:?} for {path:?}; expected .csv or .xlsx")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Load a transaction dataset from a CSV or Excel file.
///
/// Dispatches on the file extension: `.csv` is read as comma-separated
/// values with a header row, `.xlsx` as the first worksheet of the
/// workbook. Any other extension fails with [`ImportError::UnsupportedFormat`]
/// before anything is read.
pub fn import_data(path: impl AsRef<Path>) -> crate::Result<DataFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "csv" => read_csv(path),
        "xlsx" => read_excel(path),
        _ => Err(ImportError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }
        .into()),
    }
}

/// Keep only business-valid rows: present `CustomerID`, `Quantity > 0`,
/// `UnitPrice > 0`. Returns a new frame; the input is untouched and row
/// order is preserved. Rows failing a predicate are dropped silently.
pub fn filter_data(df: &DataFrame) -> crate::Result<DataFrame> {
    let filtered = df
        .clone()
        .lazy()
        .filter(
            col("CustomerID")
                .is_not_null()
                .and(col("Quantity").gt(lit(0)))
                .and(col("UnitPrice").gt(lit(0.0))),
        )
        .collect()?;
    Ok(filtered)
}

/// Return a new frame with the derived `revenue` and `quarter` columns
/// appended: `revenue = Quantity * UnitPrice`, `quarter` = calendar
/// quarter (1-4) of `InvoiceDate`.
pub fn with_derived_columns(df: &DataFrame) -> crate::Result<DataFrame> {
    let derived = df
        .clone()
        .lazy()
        .with_columns([
            (col("Quantity") * col("UnitPrice")).alias("revenue"),
            col("InvoiceDate")
                .dt()
                .quarter()
                .cast(DataType::Int32)
                .alias("quarter"),
        ])
        .collect()?;
    Ok(derived)
}

fn read_csv(path: &Path) -> crate::Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    normalize_invoice_dates(df)
}

/// CSV files in the wild carry `InvoiceDate` in formats the reader's date
/// inference does not always catch. If the column came back as plain text,
/// parse it into a datetime here so downstream quarter extraction works.
fn normalize_invoice_dates(df: DataFrame) -> crate::Result<DataFrame> {
    let is_text = df
        .column("InvoiceDate")
        .map(|c| matches!(c.dtype(), DataType::String))
        .unwrap_or(false);
    if !is_text {
        return Ok(df);
    }

    let df = df
        .lazy()
        .with_columns([col("InvoiceDate").str().strptime(
            DataType::Datetime(TimeUnit::Microseconds, None),
            StrptimeOptions::default(),
            lit("raise"),
        )])
        .collect()?;
    Ok(df)
}

fn read_excel(path: &Path) -> crate::Result<DataFrame> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("workbook {:?} contains no worksheets", path))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let header = header_names(
        rows.next()
            .ok_or_else(|| anyhow::anyhow!("worksheet {sheet:?} is empty"))?,
    );
    let body: Vec<&[Data]> = rows.collect();

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(idx, name)| build_column(name, &body, idx))
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Column names from the header row. Blank header cells get positional
/// names so a worksheet with unnamed trailing columns still loads instead
/// of failing on duplicate empty names.
fn header_names(row: &[Data]) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.as_string().unwrap_or_default().trim().to_string();
            if name.is_empty() {
                format!("column_{idx}")
            } else {
                name
            }
        })
        .collect()
}

/// What a worksheet column holds, decided by scanning its cells. Blank
/// cells become nulls; a single text cell makes the whole column text.
enum ColumnKind {
    Int,
    Float,
    Date,
    Text,
}

fn classify_column(body: &[&[Data]], idx: usize) -> ColumnKind {
    let mut saw_int = false;
    let mut saw_float = false;
    let mut saw_date = false;
    let mut saw_text = false;

    for row in body {
        match row.get(idx) {
            Some(Data::Int(_)) => saw_int = true,
            Some(Data::Float(_)) => saw_float = true,
            Some(Data::DateTime(_)) | Some(Data::DateTimeIso(_)) => saw_date = true,
            Some(Data::Empty) | None => {}
            Some(_) => saw_text = true,
        }
    }

    if saw_text {
        ColumnKind::Text
    } else if saw_date {
        ColumnKind::Date
    } else if saw_float {
        ColumnKind::Float
    } else if saw_int {
        ColumnKind::Int
    } else {
        ColumnKind::Text
    }
}

fn build_column(name: &str, body: &[&[Data]], idx: usize) -> Column {
    let cells = body.iter().map(|row| row.get(idx).unwrap_or(&Data::Empty));

    match classify_column(body, idx) {
        ColumnKind::Int => {
            let ca: Int64Chunked = cells.map(|cell| cell.as_i64()).collect();
            ca.with_name(name.into()).into_column()
        }
        ColumnKind::Float => {
            let ca: Float64Chunked = cells.map(|cell| cell.as_f64()).collect();
            ca.with_name(name.into()).into_column()
        }
        ColumnKind::Date => {
            let ca: Int64Chunked = cells
                .map(|cell| {
                    cell.as_datetime()
                        .map(|dt: chrono::NaiveDateTime| dt.and_utc().timestamp_micros())
                })
                .collect();
            ca.with_name(name.into())
                .into_datetime(TimeUnit::Microseconds, None)
                .into_column()
        }
        ColumnKind::Text => {
            let ca: StringChunked = cells
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        cell.as_string()
                    }
                })
                .collect();
            ca.with_name(name.into()).into_column()
        }
    }
}

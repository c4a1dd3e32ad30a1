use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Missing required columns: {}", .missing.join(", "))]
    InvalidSchema { missing: Vec<String> },

    #[error(
        "Cannot write {}: only .xlsx, .xlsm and .csv files can be written",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),

    #[error("Value too large: {0}")]
    Overflow(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Product with SKU '{0}' already exists. Use update instead.")]
    DuplicateKey(String),

    #[error("Product with SKU '{0}' not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, StockError>;

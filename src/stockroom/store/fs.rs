use super::TableBackend;
use crate::error::{Result, StockError};
use crate::model::ProductRecord;
use crate::sheet::{self, SheetFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores the product table in a single spreadsheet file.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StockError::Io)?;
            }
        }
        Ok(())
    }
}

impl TableBackend for FileBackend {
    fn read_rows(&self) -> Result<Option<Vec<ProductRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        sheet::read_table(&self.path).map(Some)
    }

    fn write_rows(&mut self, rows: &[ProductRecord]) -> Result<()> {
        SheetFormat::writable(&self.path)?;
        self.ensure_dir()?;
        sheet::write_table(&self.path, rows)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LoadStatus, RecordStore};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path().join("inventory_data.xlsx"));
        assert!(backend.read_rows().unwrap().is_none());
    }

    #[test]
    fn creates_parent_directory_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("inventory_data.xlsx");
        let mut backend = FileBackend::new(&path);

        backend.write_rows(&[]).unwrap();
        assert!(path.exists());
        assert_eq!(backend.read_rows().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn corrupt_file_loads_as_empty_store_with_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory_data.xlsx");
        fs::write(&path, b"definitely not a workbook").unwrap();

        let mut store = RecordStore::new(FileBackend::new(&path));
        assert!(store.load().is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn store_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory_data.xlsx");

        let mut store = RecordStore::new(FileBackend::new(&path));
        assert_eq!(store.load().unwrap(), LoadStatus::Missing);
        store
            .add(ProductRecord::new("SKU001", "Wireless Mouse", 50, Decimal::new(2999, 2)))
            .unwrap();
        store
            .add(ProductRecord::new("SKU002", "USB-C Cable", 100, Decimal::new(1250, 2)))
            .unwrap();

        let mut reopened = RecordStore::new(FileBackend::new(&path));
        assert_eq!(reopened.load().unwrap(), LoadStatus::Loaded(2));
        assert_eq!(reopened.table(), store.table());
    }

    #[test]
    fn read_only_extensions_refuse_writes_and_keep_nothing_half_saved() {
        let dir = TempDir::new().unwrap();
        for name in ["stock.ods", "stock.xls", "stock.xlsb"] {
            let path = dir.path().join(name);
            let mut store = RecordStore::new(FileBackend::new(&path));
            store.load().unwrap();

            let err = store
                .add(ProductRecord::new("SKU001", "Wireless Mouse", 50, Decimal::new(2999, 2)))
                .unwrap_err();
            assert!(matches!(err, StockError::UnsupportedFormat(_)), "{}: {}", name, err);
            assert!(store.is_empty());
            assert!(!path.exists());

            let mut reopened = RecordStore::new(FileBackend::new(&path));
            assert_eq!(reopened.load().unwrap(), LoadStatus::Missing);
        }
    }
}

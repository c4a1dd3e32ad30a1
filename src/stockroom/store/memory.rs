use super::TableBackend;
use crate::error::{Result, StockError};
use crate::model::ProductRecord;
use std::io;

/// In-memory backend for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    rows: Option<Vec<ProductRecord>>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<ProductRecord>) -> Self {
        Self {
            rows: Some(rows),
            ..Self::default()
        }
    }

    /// Every read fails as if the stored table were corrupt.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Every write fails as if the disk were full.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn rows(&self) -> Option<&[ProductRecord]> {
        self.rows.as_deref()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl TableBackend for InMemoryBackend {
    fn read_rows(&self) -> Result<Option<Vec<ProductRecord>>> {
        if self.fail_reads {
            return Err(StockError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "stored table is corrupt",
            )));
        }
        Ok(self.rows.clone())
    }

    fn write_rows(&mut self, rows: &[ProductRecord]) -> Result<()> {
        if self.fail_writes {
            return Err(StockError::Io(io::Error::new(
                io::ErrorKind::Other,
                "write refused",
            )));
        }
        self.rows = Some(rows.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::RecordStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    pub struct StoreFixture {
        pub store: RecordStore<InMemoryBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(InMemoryBackend::new()),
            }
        }

        pub fn with_product(mut self, sku: &str, name: &str, quantity: u32, price: &str) -> Self {
            let price = Decimal::from_str(price).unwrap();
            self.store
                .add(ProductRecord::new(sku, name, quantity, price))
                .unwrap();
            self
        }

        /// The five products written by the `sample` command.
        pub fn with_samples(mut self) -> Self {
            self.store
                .import_batch(crate::commands::sample::sample_products())
                .unwrap();
            self
        }
    }
}

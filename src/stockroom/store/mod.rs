//! # Storage Layer
//!
//! The [`RecordStore`] owns the in-memory product [`Table`] and keeps it in
//! sync with a [`TableBackend`]. The table is loaded wholesale and written
//! back wholesale after every mutation; there is no incremental diff.
//!
//! ## Commit Pattern
//!
//! Mutations are staged on a copy of the table. The copy is written to the
//! backend and only becomes the live table once that write succeeds, so a
//! failed save leaves memory exactly as it was after the last good operation.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production storage in a spreadsheet file (see
//!   [`crate::sheet`] for the formats)
//! - [`memory::InMemoryBackend`]: rows kept in memory, with switches to make
//!   reads or writes fail, for testing

use crate::error::{Result, StockError};
use crate::model::{ProductRecord, ProductUpdate};
use tracing::{debug, error, info, warn};

pub mod fs;
pub mod memory;
pub mod reconcile;
pub mod table;

pub use reconcile::{ReconcileReport, RowOutcome};
pub use table::Table;

/// Raw persistence of the product table.
pub trait TableBackend {
    /// Read every stored row in file order. `Ok(None)` when nothing has been
    /// stored yet.
    fn read_rows(&self) -> Result<Option<Vec<ProductRecord>>>;

    /// Replace the stored table with `rows`.
    fn write_rows(&mut self, rows: &[ProductRecord]) -> Result<()>;

    /// Where the rows live, for messages.
    fn location(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(usize),
    Missing,
}

pub struct RecordStore<B: TableBackend> {
    backend: B,
    table: Table,
}

impl<B: TableBackend> RecordStore<B> {
    /// Wrap `backend` with an empty table. Call [`RecordStore::load`] to read it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            table: Table::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Replace the in-memory table with the backend contents.
    ///
    /// A missing table starts empty. An unreadable one is logged, leaves the
    /// store empty and returns the error.
    pub fn load(&mut self) -> Result<LoadStatus> {
        match self.backend.read_rows() {
            Ok(Some(rows)) => {
                let row_count = rows.len();
                self.table = Table::from_records(rows);
                if self.table.len() < row_count {
                    warn!(
                        location = %self.backend.location(),
                        rows = row_count,
                        unique = self.table.len(),
                        "duplicate SKUs in inventory file, later rows kept"
                    );
                }
                debug!(location = %self.backend.location(), products = self.table.len(), "loaded inventory");
                Ok(LoadStatus::Loaded(self.table.len()))
            }
            Ok(None) => {
                self.table = Table::new();
                debug!(location = %self.backend.location(), "no inventory file, starting empty");
                Ok(LoadStatus::Missing)
            }
            Err(e) => {
                error!(location = %self.backend.location(), error = %e, "failed to load inventory, starting empty");
                self.table = Table::new();
                Err(e)
            }
        }
    }

    /// Write the whole in-memory table to the backend.
    pub fn save(&mut self) -> Result<()> {
        self.backend.write_rows(&self.table.to_vec()).map_err(|e| {
            error!(location = %self.backend.location(), error = %e, "failed to save inventory");
            e
        })
    }

    fn commit(&mut self, next: Table) -> Result<()> {
        if let Err(e) = self.backend.write_rows(&next.to_vec()) {
            error!(location = %self.backend.location(), error = %e, "failed to save inventory, change discarded");
            return Err(e);
        }
        self.table = next;
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn records(&self) -> impl Iterator<Item = &ProductRecord> {
        self.table.iter()
    }

    pub fn get(&self, sku: &str) -> Option<&ProductRecord> {
        self.table.get(sku)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.table.contains(sku)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn add(&mut self, record: ProductRecord) -> Result<()> {
        record.validate()?;
        if self.table.contains(&record.sku) {
            return Err(StockError::DuplicateKey(record.sku));
        }

        let sku = record.sku.clone();
        let mut next = self.table.clone();
        next.upsert(record);
        self.commit(next)?;

        info!(%sku, "added product");
        Ok(())
    }

    /// Apply `update` to the record with `sku` and return the new record.
    pub fn update(&mut self, sku: &str, update: &ProductUpdate) -> Result<ProductRecord> {
        let mut next = self.table.clone();
        let record = next
            .get_mut(sku)
            .ok_or_else(|| StockError::NotFound(sku.to_string()))?;
        update.apply(record);
        record.validate()?;
        let updated = record.clone();

        self.commit(next)?;
        info!(%sku, quantity = ?update.quantity, price = ?update.price, "updated product");
        Ok(updated)
    }

    /// Remove the record with `sku` and return it.
    pub fn delete(&mut self, sku: &str) -> Result<ProductRecord> {
        let mut next = self.table.clone();
        let removed = next
            .remove(sku)
            .ok_or_else(|| StockError::NotFound(sku.to_string()))?;

        self.commit(next)?;
        info!(%sku, "deleted product");
        Ok(removed)
    }

    /// Merge `batch` into the table (see [`reconcile`]) and persist once.
    ///
    /// Every row is validated first; one invalid row rejects the batch.
    pub fn import_batch(&mut self, batch: Vec<ProductRecord>) -> Result<ReconcileReport> {
        for record in &batch {
            record.validate()?;
        }

        let mut next = self.table.clone();
        let report = reconcile::reconcile(&mut next, batch);
        self.commit(next)?;

        info!(
            processed = report.processed(),
            inserted = report.inserted(),
            updated = report.updated(),
            "imported batch"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryBackend;
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn mouse() -> ProductRecord {
        ProductRecord::new("SKU001", "Wireless Mouse", 50, dec("29.99"))
    }

    fn store_with_mouse() -> RecordStore<InMemoryBackend> {
        let mut store = RecordStore::new(InMemoryBackend::with_rows(vec![mouse()]));
        store.load().unwrap();
        store
    }

    #[test]
    fn load_missing_table_starts_empty() {
        let mut store = RecordStore::new(InMemoryBackend::new());
        assert_eq!(store.load().unwrap(), LoadStatus::Missing);
        assert!(store.is_empty());
    }

    #[test]
    fn load_failure_falls_back_to_empty() {
        let mut store = store_with_mouse();
        assert_eq!(store.len(), 1);

        *store.backend_mut() = InMemoryBackend::new().failing_reads();
        assert!(store.load().is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn add_then_delete_leaves_no_trace() {
        let mut store = store_with_mouse();
        store
            .add(ProductRecord::new("SKU006", "USB Hub 4-Port", 40, dec("24.99")))
            .unwrap();
        assert!(store.contains("SKU006"));

        store.delete("SKU006").unwrap();
        assert!(!store.contains("SKU006"));
        assert_eq!(store.backend().rows().unwrap().len(), 1);
    }

    #[test]
    fn add_rejects_duplicate_sku() {
        let mut store = store_with_mouse();
        let err = store.add(mouse()).unwrap_err();
        assert!(matches!(err, StockError::DuplicateKey(sku) if sku == "SKU001"));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn add_persists_every_time() {
        let mut store = store_with_mouse();
        store.add(ProductRecord::new("A", "a", 1, dec("1"))).unwrap();
        store.add(ProductRecord::new("B", "b", 1, dec("1"))).unwrap();
        assert_eq!(store.backend().write_count(), 2);
        assert_eq!(store.backend().rows().unwrap().len(), 3);
    }

    #[test]
    fn update_quantity_leaves_price_alone() {
        let mut store = store_with_mouse();
        let updated = store
            .update("SKU001", &ProductUpdate::new(Some(10), None))
            .unwrap();
        assert_eq!(updated.quantity, 10);
        assert_eq!(updated.price, dec("29.99"));
    }

    #[test]
    fn update_quantity_and_price() {
        let mut store = store_with_mouse();
        store
            .update("SKU001", &ProductUpdate::new(Some(75), Some(dec("27.99"))))
            .unwrap();
        assert_eq!(
            store.get("SKU001"),
            Some(&ProductRecord::new("SKU001", "Wireless Mouse", 75, dec("27.99")))
        );
        assert_eq!(store.backend().rows().unwrap()[0].quantity, 75);
    }

    #[test]
    fn update_and_delete_unknown_sku() {
        let mut store = store_with_mouse();
        assert!(matches!(
            store.update("SKU404", &ProductUpdate::new(Some(1), None)),
            Err(StockError::NotFound(_))
        ));
        assert!(matches!(store.delete("SKU404"), Err(StockError::NotFound(_))));
        assert!(matches!(store.delete("sku001"), Err(StockError::NotFound(_))));
    }

    #[test]
    fn update_rejects_negative_price() {
        let mut store = store_with_mouse();
        assert!(store
            .update("SKU001", &ProductUpdate::new(None, Some(dec("-1"))))
            .is_err());
        assert_eq!(store.get("SKU001").unwrap().price, dec("29.99"));
    }

    #[test]
    fn add_rejects_value_beyond_decimal_range() {
        let mut store = store_with_mouse();
        let big = ProductRecord::new("BIG", "Bulk", 100_000, dec("10000000000000000000000000"));

        assert!(matches!(store.add(big), Err(StockError::InvalidRecord(_))));
        assert!(!store.contains("BIG"));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn failed_save_keeps_previous_state() {
        let mut store = store_with_mouse();
        *store.backend_mut() = InMemoryBackend::with_rows(vec![mouse()]).failing_writes();

        assert!(store.add(ProductRecord::new("B", "b", 1, dec("1"))).is_err());
        assert!(store.update("SKU001", &ProductUpdate::new(Some(1), None)).is_err());
        assert!(store.delete("SKU001").is_err());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("SKU001"), Some(&mouse()));
    }

    #[test]
    fn import_batch_upserts_and_persists_once() {
        let mut store = store_with_mouse();
        let report = store
            .import_batch(vec![
                ProductRecord::new("SKU001", "Wireless Mouse", 80, dec("25.00")),
                ProductRecord::new("SKU999", "New Item", 10, dec("5.00")),
            ])
            .unwrap();

        assert_eq!(report.processed(), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("SKU001").unwrap().quantity, 80);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn import_batch_with_invalid_row_changes_nothing() {
        let mut store = store_with_mouse();
        let result = store.import_batch(vec![
            ProductRecord::new("SKU002", "Cable", 1, dec("1")),
            ProductRecord::new("", "Nameless", 1, dec("1")),
        ]);

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = store_with_mouse();
        store
            .add(ProductRecord::new("SKU002", "USB-C Cable", 100, dec("12.50")))
            .unwrap();
        store.save().unwrap();
        let before = store.table().clone();

        store.load().unwrap();
        assert_eq!(store.table(), &before);
    }
}

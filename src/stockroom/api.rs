//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every inventory operation, whatever the UI.
//!
//! It dispatches to `commands/*.rs`, normalizes user input (trimming SKUs,
//! blank filters) and returns `Result<CmdResult>`. It does no printing and
//! holds no business logic.
//!
//! `InventoryApi<B: TableBackend>` is generic over the storage backend:
//! `FileBackend` in production, `InMemoryBackend` in tests.

use crate::commands;
use crate::error::{Result, StockError};
use crate::model::{ProductRecord, ProductUpdate};
use crate::store::{RecordStore, TableBackend};
use std::path::Path;

pub struct InventoryApi<B: TableBackend> {
    store: RecordStore<B>,
    paths: commands::StockroomPaths,
    export_ext: String,
}

impl<B: TableBackend> InventoryApi<B> {
    /// Wrap `backend`. Nothing is read until [`InventoryApi::load`].
    pub fn new(backend: B, paths: commands::StockroomPaths, export_ext: impl Into<String>) -> Self {
        Self {
            store: RecordStore::new(backend),
            paths,
            export_ext: export_ext.into(),
        }
    }

    pub fn load(&mut self) -> commands::CmdResult {
        commands::load::run(&mut self.store)
    }

    pub fn view(&self, filter: commands::view::ProductFilter) -> commands::CmdResult {
        commands::view::run(&self.store, &filter)
    }

    pub fn search(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn add_product(&mut self, record: ProductRecord) -> Result<commands::CmdResult> {
        let record = ProductRecord {
            sku: normalize_sku(&record.sku)?,
            name: record.name.trim().to_string(),
            ..record
        };
        commands::add::run(&mut self.store, record)
    }

    pub fn update_product(
        &mut self,
        sku: &str,
        update: &ProductUpdate,
    ) -> Result<commands::CmdResult> {
        let sku = normalize_sku(sku)?;
        commands::update::run(&mut self.store, &sku, update)
    }

    pub fn delete_product(&mut self, sku: &str) -> Result<commands::CmdResult> {
        let sku = normalize_sku(sku)?;
        commands::delete::run(&mut self.store, &sku)
    }

    pub fn import_products(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn export_products(&self, path: Option<&Path>) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, path, &self.export_ext)
    }

    pub fn write_sample(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::sample::run(path)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.store.contains(sku.trim())
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}

fn normalize_sku(sku: &str) -> Result<String> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(StockError::Api("SKU cannot be empty".to_string()));
    }
    Ok(sku.to_string())
}

pub use crate::commands::config::ConfigAction;
pub use commands::view::ProductFilter;
pub use commands::{CmdMessage, CmdResult, MessageLevel, StockroomPaths};

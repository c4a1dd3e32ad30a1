use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::sheet;
use crate::store::{RecordStore, RowOutcome, TableBackend};
use std::path::Path;

/// Import products from a sheet, upserting by SKU.
///
/// The sheet is fully read and validated before the store is touched, so a
/// missing column or a bad row leaves the inventory as it was.
pub fn run<B: TableBackend>(store: &mut RecordStore<B>, path: &Path) -> Result<CmdResult> {
    let batch = sheet::read_table(path)?;
    let report = store.import_batch(batch.clone())?;

    let mut result = CmdResult::default();
    for (sku, outcome) in &report.rows {
        let line = match outcome {
            RowOutcome::Updated => format!("Updated existing product: {}", sku),
            RowOutcome::Inserted => format!("Added new product: {}", sku),
        };
        result.add_message(CmdMessage::info(line));
    }
    result.add_message(CmdMessage::success(format!(
        "Successfully imported {} products from {}",
        report.processed(),
        path.display()
    )));

    Ok(result.with_affected_products(batch))
}

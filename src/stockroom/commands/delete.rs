use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, TableBackend};

pub fn run<B: TableBackend>(store: &mut RecordStore<B>, sku: &str) -> Result<CmdResult> {
    let removed = store.delete(sku)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted product: {} - {}",
        removed.sku, removed.name
    )));
    Ok(result.with_affected_products(vec![removed]))
}

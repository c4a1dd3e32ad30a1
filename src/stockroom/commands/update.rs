use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductUpdate;
use crate::store::{RecordStore, TableBackend};

pub fn run<B: TableBackend>(
    store: &mut RecordStore<B>,
    sku: &str,
    update: &ProductUpdate,
) -> Result<CmdResult> {
    let record = store.update(sku, update)?;
    let mut result = CmdResult::default();

    if let Some(quantity) = update.quantity {
        result.add_message(CmdMessage::success(format!(
            "Updated quantity for {} to {}",
            sku, quantity
        )));
    }
    if let Some(price) = update.price {
        result.add_message(CmdMessage::success(format!(
            "Updated price for {} to ${:.2}",
            sku, price
        )));
    }
    if update.is_empty() {
        result.add_message(CmdMessage::info(format!("Nothing to update for {}", sku)));
    }

    Ok(result.with_affected_products(vec![record]))
}

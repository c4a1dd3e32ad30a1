use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductRecord;
use crate::store::{RecordStore, TableBackend};

pub fn run<B: TableBackend>(store: &mut RecordStore<B>, record: ProductRecord) -> Result<CmdResult> {
    store.add(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added product: {} - {}",
        record.sku, record.name
    )));
    Ok(result.with_affected_products(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::store::memory::fixtures::StoreFixture;
    use rust_decimal::Decimal;

    #[test]
    fn adds_new_product() {
        let mut store = StoreFixture::new().with_samples().store;
        let record = ProductRecord::new("SKU006", "USB Hub 4-Port", 40, Decimal::new(2499, 2));

        let result = run(&mut store, record.clone()).unwrap();

        assert_eq!(store.len(), 6);
        assert_eq!(store.get("SKU006"), Some(&record));
        assert_eq!(result.affected_products, vec![record]);
        assert_eq!(result.messages[0].content, "Added product: SKU006 - USB Hub 4-Port");
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let mut store = StoreFixture::new().with_samples().store;
        let record = ProductRecord::new("SKU001", "Other Mouse", 1, Decimal::ONE);

        assert!(matches!(
            run(&mut store, record),
            Err(StockError::DuplicateKey(_))
        ));
        assert_eq!(store.get("SKU001").unwrap().name, "Wireless Mouse");
    }
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ProductRecord;
use crate::sheet;
use rust_decimal::Decimal;
use std::path::Path;

/// A small, fixed product list for trying out imports.
pub fn sample_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new("SKU001", "Wireless Mouse", 50, Decimal::new(2999, 2)),
        ProductRecord::new("SKU002", "USB-C Cable", 100, Decimal::new(1250, 2)),
        ProductRecord::new("SKU003", "Laptop Stand", 25, Decimal::new(4500, 2)),
        ProductRecord::new("SKU004", "Bluetooth Keyboard", 30, Decimal::new(7999, 2)),
        ProductRecord::new("SKU005", "Webcam HD", 15, Decimal::new(8995, 2)),
    ]
}

/// Write the sample products to `path` (xlsx or csv by extension).
pub fn run(path: &Path) -> Result<CmdResult> {
    let products = sample_products();
    sheet::write_table(path, &products)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created {} with {} sample products",
        path.display(),
        products.len()
    )));
    Ok(result
        .with_listed_products(products)
        .with_paths(vec![path.to_path_buf()]))
}

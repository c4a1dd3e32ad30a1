use crate::error::{Result, StockError};
use rust_decimal::Decimal;

/// Column headers of the inventory sheet, in the order they are written.
pub const COLUMNS: [&str; 4] = ["SKU", "Product_Name", "Quantity", "Price"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl ProductRecord {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Stock value of this line: quantity times unit price.
    pub fn value(&self) -> Result<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.price)
            .ok_or_else(|| {
                StockError::Overflow(format!(
                    "{} x {} for '{}' exceeds the supported range",
                    self.quantity, self.price, self.sku
                ))
            })
    }

    /// Rejects records that cannot be stored: blank SKU, negative price, or a
    /// line value too large to compute.
    pub fn validate(&self) -> Result<()> {
        if self.sku.trim().is_empty() {
            return Err(StockError::InvalidRecord("SKU cannot be empty".to_string()));
        }
        if self.price < Decimal::ZERO {
            return Err(StockError::InvalidRecord(format!(
                "price for '{}' cannot be negative ({})",
                self.sku, self.price
            )));
        }
        self.value()
            .map_err(|e| StockError::InvalidRecord(e.to_string()))?;
        Ok(())
    }
}

/// Partial change to an existing record. Fields left as `None` are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
}

impl ProductUpdate {
    pub fn new(quantity: Option<u32>, price: Option<Decimal>) -> Self {
        Self { quantity, price }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }

    pub fn apply(&self, record: &mut ProductRecord) {
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
    }
}

/// Sum of `value()` over a set of records. Fails instead of wrapping when
/// the sum leaves `Decimal`'s range.
pub fn total_value<'a, I>(records: I) -> Result<Decimal>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    records.into_iter().try_fold(Decimal::ZERO, |total, record| {
        total
            .checked_add(record.value()?)
            .ok_or_else(|| StockError::Overflow("total inventory value".to_string()))
    })
}

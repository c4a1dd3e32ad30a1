use crate::model::ProductRecord;
use std::collections::HashMap;

/// SKU-keyed product table that remembers insertion order.
///
/// The map holds the records, `order` holds every key exactly once. Both are
/// only touched through the methods below so they cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: HashMap<String, ProductRecord>,
    order: Vec<String>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows in file order. A repeated SKU replaces the
    /// earlier row but keeps its position.
    pub fn from_records<I: IntoIterator<Item = ProductRecord>>(records: I) -> Self {
        let mut table = Self::new();
        for record in records {
            table.upsert(record);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.records.contains_key(sku)
    }

    pub fn get(&self, sku: &str) -> Option<&ProductRecord> {
        self.records.get(sku)
    }

    pub fn get_mut(&mut self, sku: &str) -> Option<&mut ProductRecord> {
        self.records.get_mut(sku)
    }

    /// Insert or overwrite by SKU. Returns the record that was replaced, if any.
    pub fn upsert(&mut self, record: ProductRecord) -> Option<ProductRecord> {
        let sku = record.sku.clone();
        let previous = self.records.insert(sku.clone(), record);
        if previous.is_none() {
            self.order.push(sku);
        }
        previous
    }

    pub fn remove(&mut self, sku: &str) -> Option<ProductRecord> {
        let removed = self.records.remove(sku)?;
        self.order.retain(|k| k != sku);
        Some(removed)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.order.iter().filter_map(|sku| self.records.get(sku))
    }

    pub fn to_vec(&self) -> Vec<ProductRecord> {
        self.iter().cloned().collect()
    }
}

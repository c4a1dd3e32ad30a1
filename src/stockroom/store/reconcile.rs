//! Upsert-by-SKU merge of an incoming batch into a [`Table`].
//!
//! Rows are applied in batch order. A row whose SKU already exists replaces
//! that record wholesale (name, quantity and price all come from the row); any
//! other row is appended. A SKU repeated inside the batch is therefore first
//! inserted and then overwritten by the later row.

use super::table::Table;
use crate::model::ProductRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    Updated,
}

/// What happened to each incoming row, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub rows: Vec<(String, RowOutcome)>,
}

impl ReconcileReport {
    pub fn processed(&self) -> usize {
        self.rows.len()
    }

    pub fn inserted(&self) -> usize {
        self.count(RowOutcome::Inserted)
    }

    pub fn updated(&self) -> usize {
        self.count(RowOutcome::Updated)
    }

    fn count(&self, outcome: RowOutcome) -> usize {
        self.rows.iter().filter(|(_, o)| *o == outcome).count()
    }
}

pub fn reconcile<I>(table: &mut Table, batch: I) -> ReconcileReport
where
    I: IntoIterator<Item = ProductRecord>,
{
    let mut report = ReconcileReport::default();
    for record in batch {
        let sku = record.sku.clone();
        let outcome = match table.upsert(record) {
            Some(_) => RowOutcome::Updated,
            None => RowOutcome::Inserted,
        };
        report.rows.push((sku, outcome));
    }
    report
}

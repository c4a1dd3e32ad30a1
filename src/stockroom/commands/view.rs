use crate::commands::{contains_folded, CmdMessage, CmdResult};
use crate::model::{total_value, ProductRecord};
use crate::store::{RecordStore, TableBackend};

/// Optional SKU and name substrings; both must match when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub sku: Option<String>,
    pub name: Option<String>,
}

impl ProductFilter {
    pub fn new(sku: Option<String>, name: Option<String>) -> Self {
        // Blank predicates match everything, same as leaving them out.
        let keep = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        Self {
            sku: keep(sku),
            name: keep(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sku.is_none() && self.name.is_none()
    }
}

pub fn filter_records<'a, I>(records: I, filter: &ProductFilter) -> Vec<ProductRecord>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    let sku = filter.sku.as_deref().map(str::to_lowercase);
    let name = filter.name.as_deref().map(str::to_lowercase);

    records
        .into_iter()
        .filter(|r| sku.as_deref().map_or(true, |s| contains_folded(&r.sku, s)))
        .filter(|r| name.as_deref().map_or(true, |n| contains_folded(&r.name, n)))
        .cloned()
        .collect()
}

pub fn run<B: TableBackend>(store: &RecordStore<B>, filter: &ProductFilter) -> CmdResult {
    let listed = filter_records(store.records(), filter);

    let mut result = CmdResult::default();
    if store.is_empty() {
        result.add_message(CmdMessage::info("Inventory is empty."));
    } else if listed.is_empty() {
        result.add_message(CmdMessage::info(
            "No products found matching the filter criteria.",
        ));
    }

    // The listing is still useful when only the total cannot be computed.
    match total_value(&listed) {
        Ok(total) => result.with_listed_products(listed).with_total_value(total),
        Err(e) => {
            result.add_message(CmdMessage::error(format!(
                "Total inventory value not available: {}",
                e
            )));
            result.with_listed_products(listed)
        }
    }
}

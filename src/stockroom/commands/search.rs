use crate::commands::{contains_folded, CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::model::ProductRecord;
use crate::store::{RecordStore, TableBackend};

/// Records whose SKU or name contains `term`, ignoring case.
pub fn search_records<'a, I>(records: I, term: &str) -> Vec<ProductRecord>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    let term = term.to_lowercase();
    records
        .into_iter()
        .filter(|r| contains_folded(&r.sku, &term) || contains_folded(&r.name, &term))
        .cloned()
        .collect()
}

pub fn run<B: TableBackend>(store: &RecordStore<B>, term: &str) -> Result<CmdResult> {
    let term = term.trim();
    if term.is_empty() {
        return Err(StockError::Api("Search term cannot be empty".to_string()));
    }

    let listed = search_records(store.records(), term);
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No products found matching '{}'",
            term
        )));
    }
    Ok(result.with_listed_products(listed))
}

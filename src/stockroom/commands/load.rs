use crate::commands::{CmdMessage, CmdResult};
use crate::store::{LoadStatus, RecordStore, TableBackend};

/// Load the store from its backend.
///
/// Never fails: an unreadable table leaves the store empty and is reported as
/// an error message, so the session can still continue.
pub fn run<B: TableBackend>(store: &mut RecordStore<B>) -> CmdResult {
    let mut result = CmdResult::default();
    match store.load() {
        Ok(LoadStatus::Loaded(count)) => result.add_message(CmdMessage::info(format!(
            "Loaded {} products from {}",
            count,
            store.location()
        ))),
        Ok(LoadStatus::Missing) => result.add_message(CmdMessage::info(
            "No existing inventory file found. Starting fresh.",
        )),
        Err(e) => result.add_message(CmdMessage::error(format!(
            "Error loading inventory from {}: {}. Starting with an empty inventory.",
            store.location(),
            e
        ))),
    }
    result
}

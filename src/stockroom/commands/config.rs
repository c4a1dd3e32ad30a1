use crate::commands::{CmdMessage, CmdResult, StockroomPaths};
use crate::config::StockroomConfig;
use crate::error::{Result, StockError};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Read or change `stockroom.json` in the data directory.
///
/// Unknown keys and rejected values are errors; `stockroom.json` is only
/// rewritten after a value has been accepted.
pub fn run(paths: &StockroomPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    let mut config = StockroomConfig::load(dir)?;

    let result = match action {
        ConfigAction::ShowAll => CmdResult::default(),
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| StockError::Api(format!("Unknown config key: {}", key)))?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(value));
            result
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(dir)?;

            let stored = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
            result
        }
    };
    Ok(result.with_config(config))
}

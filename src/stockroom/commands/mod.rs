use crate::config::StockroomConfig;
use crate::model::ProductRecord;
use rust_decimal::Decimal;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod export;
pub mod import;
pub mod load;
pub mod sample;
pub mod search;
pub mod update;
pub mod view;

/// Directories the commands may touch outside the record store.
#[derive(Debug, Clone)]
pub struct StockroomPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created, changed or removed by the command.
    pub affected_products: Vec<ProductRecord>,
    /// Records selected for display.
    pub listed_products: Vec<ProductRecord>,
    /// Σ quantity × price over `listed_products`, for commands that report it.
    pub total_value: Option<Decimal>,
    /// Files written by the command.
    pub paths: Vec<PathBuf>,
    pub config: Option<StockroomConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_products(mut self, products: Vec<ProductRecord>) -> Self {
        self.affected_products = products;
        self
    }

    pub fn with_listed_products(mut self, products: Vec<ProductRecord>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_total_value(mut self, total: Decimal) -> Self {
        self.total_value = Some(total);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: StockroomConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Case-insensitive substring test. `needle` must already be lowercase.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

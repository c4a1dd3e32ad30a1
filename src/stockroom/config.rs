use crate::error::{Result, StockError};
use crate::sheet::SheetFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "stockroom.json";
const DEFAULT_DATA_FILE: &str = "inventory_data.xlsx";
const DEFAULT_EXPORT_EXT: &str = ".xlsx";

/// Configuration for stockroom, stored in `<data dir>/stockroom.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockroomConfig {
    /// Inventory file, relative to the data directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Extension added to export paths that have none (e.g. ".xlsx", ".csv")
    #[serde(default = "default_export_ext")]
    pub export_ext: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_export_ext() -> String {
    DEFAULT_EXPORT_EXT.to_string()
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_ext: default_export_ext(),
        }
    }
}

impl StockroomConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StockError::Io)?;
        let config: StockroomConfig =
            serde_json::from_str(&content).map_err(StockError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StockError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StockError::Serialization)?;
        fs::write(config_path, content).map_err(StockError::Io)?;
        Ok(())
    }

    /// Look up a value by its command-line key (`data-file`, `export-ext`).
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "export-ext" => Some(self.export_ext.clone()),
            _ => None,
        }
    }

    /// Set a value by its command-line key. Unknown keys and unusable values
    /// are rejected without touching the config.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => self.set_data_file(value),
            "export-ext" => self.set_export_ext(value),
            _ => Err(StockError::Api(format!("Unknown config key: {}", key))),
        }
    }

    /// Absolute location of the inventory file for a data directory.
    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data_file)
    }

    /// The inventory file is rewritten on every change, so it must be in a
    /// format that can be written and read back.
    pub fn set_data_file(&mut self, file: &str) -> Result<()> {
        let file = file.trim();
        if file.is_empty() {
            return Err(StockError::Api("data-file cannot be empty".to_string()));
        }
        SheetFormat::writable(Path::new(file))?;
        self.data_file = file.to_string();
        Ok(())
    }

    pub fn get_export_ext(&self) -> &str {
        &self.export_ext
    }

    /// Set the export extension, normalized to start with a dot. Only
    /// writable formats are accepted.
    pub fn set_export_ext(&mut self, ext: &str) -> Result<()> {
        let ext = ext.trim();
        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };
        SheetFormat::writable(Path::new(&format!("export{}", ext)))?;
        self.export_ext = ext;
        Ok(())
    }
}

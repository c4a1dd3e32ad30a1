use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::sheet::{self, SheetFormat};
use crate::store::{RecordStore, TableBackend};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Export the whole inventory.
///
/// With no path, a timestamped file is created in the current directory. A
/// path without an extension gets `default_ext`. Targets in a format that
/// cannot be written (`.ods`, `.xls`, ...) are refused before anything is
/// touched.
pub fn run<B: TableBackend>(
    store: &RecordStore<B>,
    path: Option<&Path>,
    default_ext: &str,
) -> Result<CmdResult> {
    let target = resolve_path(path, default_ext, Local::now())?;
    let records = store.table().to_vec();
    sheet::write_table(&target, &records)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Inventory exported to {} ({} products)",
        target.display(),
        records.len()
    )));
    Ok(result.with_paths(vec![target]))
}

fn resolve_path(path: Option<&Path>, default_ext: &str, now: DateTime<Local>) -> Result<PathBuf> {
    let target = match path {
        Some(p) if p.extension().is_some() => p.to_path_buf(),
        Some(p) => {
            let mut name = p.as_os_str().to_os_string();
            name.push(default_ext);
            PathBuf::from(name)
        }
        None => PathBuf::from(format!(
            "inventory-export-{}{}",
            now.format("%Y%m%d-%H%M%S"),
            default_ext
        )),
    };
    SheetFormat::writable(&target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn appends_default_extension() {
        let now = Local::now();
        assert_eq!(
            resolve_path(Some(Path::new("out/export")), ".xlsx", now).unwrap(),
            PathBuf::from("out/export.xlsx")
        );
        assert_eq!(
            resolve_path(Some(Path::new("export.csv")), ".xlsx", now).unwrap(),
            PathBuf::from("export.csv")
        );
    }

    #[test]
    fn unwritable_targets_are_refused() {
        let now = Local::now();
        for name in ["report.ods", "report.xls", "report.XLSB"] {
            assert!(matches!(
                resolve_path(Some(Path::new(name)), ".xlsx", now),
                Err(StockError::UnsupportedFormat(_))
            ));
        }
        assert!(resolve_path(Some(Path::new("report")), ".ods", now).is_err());
        assert!(resolve_path(None, ".xls", now).is_err());
    }

    #[test]
    fn export_to_read_only_format_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = StoreFixture::new().with_samples().store;
        let path = dir.path().join("report.ods");

        assert!(matches!(
            run(&store, Some(&path), ".xlsx"),
            Err(StockError::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn default_name_is_timestamped() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            resolve_path(None, ".csv", now).unwrap(),
            PathBuf::from("inventory-export-20240309-140507.csv")
        );
    }

    #[test]
    fn exports_every_record() {
        let dir = TempDir::new().unwrap();
        let store = StoreFixture::new().with_samples().store;
        let path = dir.path().join("inventory_export");

        let result = run(&store, Some(&path), ".xlsx").unwrap();

        let written = dir.path().join("inventory_export.xlsx");
        assert_eq!(result.paths, vec![written.clone()]);
        assert_eq!(sheet::read_table(&written).unwrap(), store.table().to_vec());
    }

    #[test]
    fn missing_directory_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let store = StoreFixture::new().with_samples().store;
        let path = dir.path().join("nowhere").join("export.xlsx");

        assert!(matches!(
            run(&store, Some(&path), ".xlsx"),
            Err(StockError::FileNotFound(_))
        ));
    }
}

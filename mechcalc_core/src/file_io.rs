//! # File I/O Module
//!
//! Worksheet file operations:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! Worksheets are saved as `.mcw` files containing JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mechcalc_core::file_io::{load_worksheet, save_worksheet};
//! use mechcalc_core::worksheet::Worksheet;
//! use std::path::Path;
//!
//! let worksheet = Worksheet::new("Engineer", "Gearbox");
//! save_worksheet(&worksheet, Path::new("gearbox.mcw"))?;
//! let loaded = load_worksheet(Path::new("gearbox.mcw"))?;
//! # Ok::<(), mechcalc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{CalcError, CalcResult};
use crate::worksheet::{Worksheet, SCHEMA_VERSION};

/// Temporary path used during an atomic save
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Save a worksheet with atomic write semantics.
///
/// The JSON is written to `<path>.tmp`, synced to disk and renamed over
/// `path`, so an interrupted save never leaves a truncated worksheet.
pub fn save_worksheet(worksheet: &Worksheet, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(worksheet).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("Saved worksheet to {}", path.display());
    Ok(())
}

/// Load a worksheet from a file.
///
/// # Errors
///
/// * `CalcError::FileError` - I/O error
/// * `CalcError::SerializationError` - Invalid JSON
/// * `CalcError::VersionMismatch` - File version is incompatible
pub fn load_worksheet(path: &Path) -> CalcResult<Worksheet> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let worksheet: Worksheet =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&worksheet.meta.version)?;

    log::debug!(
        "Loaded worksheet '{}' with {} items",
        worksheet.meta.title,
        worksheet.item_count()
    );
    Ok(worksheet)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. While the major version is 0, a file with a
/// newer minor version is rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).filter(|p| !p.is_empty()).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(|| CalcError::Internal {
        message: format!("bad schema version {}", SCHEMA_VERSION),
    })?;

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CalculationItem, FastenerInput};
    use std::env::temp_dir;

    fn temp_worksheet_path(name: &str) -> PathBuf {
        temp_dir().join(format!("mechcalc_test_{}_{}.mcw", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_worksheet_path("roundtrip");

        let mut worksheet = Worksheet::new("Test Engineer", "Flange");
        worksheet.settings.default_trials = 64;
        let id = worksheet.add_item(CalculationItem::Fastener(FastenerInput {
            label: "M10".to_string(),
            nominal_diameter_mm: 10.0,
            pitch_mm: 1.5,
            proof_strength_mpa: 600.0,
            percent_proof: 75.0,
            nut_factor: 0.2,
        }));
        save_worksheet(&worksheet, &path).unwrap();

        let loaded = load_worksheet(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test Engineer");
        assert_eq!(loaded.settings.default_trials, 64);
        assert_eq!(loaded.get_item(&id), worksheet.get_item(&id));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_worksheet_path("atomic");
        let tmp_path = tmp_path_for(&path);

        save_worksheet(&Worksheet::new("Test", "Atomic"), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_worksheet(&temp_worksheet_path("missing")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_worksheet_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_newer_version_rejected() {
        let path = temp_worksheet_path("newer");
        let mut worksheet = Worksheet::new("Test", "Future");
        worksheet.meta.version = "0.9.0".to_string();
        save_worksheet(&worksheet, &path).unwrap();
        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("abc").is_err());
        assert!(validate_version("").is_err());
    }
}

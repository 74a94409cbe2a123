//! # Report Files
//!
//! Persists a rendered [`OrderReport`] as a timestamped text file.
//!
//! ```text
//! <dir>/<prefix>_<YYYY-MM-DD_HH-MM-SS>.txt
//! e.g. ~/Documents/supplier_order_2026-10-18_14-30-05.txt
//!      ~/Documents/supplier_order_2026-10-18_14-30-05_2.txt  (same second)
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fridge_core::OrderReport;
use tracing::info;

use crate::error::{ExportError, ExportResult};

/// File name prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "supplier_order";

/// File name for a report generated at the report's own timestamp.
pub fn report_file_name(prefix: &str, report: &OrderReport) -> String {
    format!(
        "{}_{}.txt",
        prefix,
        report.generated_at.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Attempts at a free file name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Writes the rendered report into `dir`, creating `dir` if needed.
///
/// An existing file is never overwritten: a second report within the same
/// second gets a `_2`, `_3`, ... suffix. A failure leaves the report
/// untouched; callers still have the text.
pub fn write_report(dir: &Path, prefix: &str, report: &OrderReport) -> ExportResult<PathBuf> {
    let base = report_file_name(prefix, report);
    fs::create_dir_all(dir).map_err(|e| ExportError::write(&dir.join(&base), e))?;

    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let path = dir.join(numbered(&base, attempt));
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(ExportError::write(&path, e)),
        };
        file.write_all(report.render().as_bytes())
            .map_err(|e| ExportError::write(&path, e))?;

        info!(path = %path.display(), total_packs = report.total_packs, "Saved supplier order");
        return Ok(path);
    }

    Err(ExportError::write(
        &dir.join(&base),
        format!("{} reports with this timestamp already exist", MAX_NAME_ATTEMPTS),
    ))
}

fn numbered(base: &str, attempt: u32) -> String {
    match (attempt, base.strip_suffix(".txt")) {
        (1, _) | (_, None) => base.to_string(),
        (n, Some(stem)) => format!("{stem}_{n}.txt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fridge_core::Product;

    fn report() -> OrderReport {
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        OrderReport::generate(&[Product::new(3, "Milk", 18, 20)], "Gourmet", at)
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            report_file_name(DEFAULT_PREFIX, &report()),
            "supplier_order_2026-10-18_14-30-05.txt"
        );
    }

    #[test]
    fn test_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports").join("october");

        let path = write_report(&dir, DEFAULT_PREFIX, &report()).unwrap();

        assert_eq!(path.parent(), Some(dir.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), report().render());
    }

    #[test]
    fn test_unwritable_destination_is_write_failed() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let err = write_report(&blocker, DEFAULT_PREFIX, &report()).unwrap_err();
        assert!(matches!(err, ExportError::WriteFailed { .. }));
    }

    #[test]
    fn test_same_second_reports_do_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();

        let first = write_report(tmp.path(), DEFAULT_PREFIX, &report()).unwrap();
        let second = write_report(tmp.path(), DEFAULT_PREFIX, &report()).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap(),
            "supplier_order_2026-10-18_14-30-05_2.txt"
        );
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
        assert_eq!(fs::read_to_string(&first).unwrap(), report().render());
    }
}

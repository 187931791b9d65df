use crate::types::ScanReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write `<prefix>.json` and `<prefix>.csv` from the report. Returns the two
/// paths written, JSON first.
pub fn write_reports(prefix: &str, report: &ScanReport) -> Result<(PathBuf, PathBuf)> {
    let json_path = PathBuf::from(format!("{prefix}.json"));
    let csv_path = PathBuf::from(format!("{prefix}.csv"));
    write_json(&json_path, report)?;
    write_csv(&csv_path, report)?;
    debug!(json = %json_path.display(), csv = %csv_path.display(), "reports written");
    Ok((json_path, csv_path))
}

/// Pretty-printed JSON: `{"scanned_at": ..., "results": [...]}`.
pub fn write_json(path: &Path, report: &ScanReport) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("failed to write JSON to {}", path.display()))?;
    Ok(())
}

/// CSV with a `port,open,error` header, rows in the report's (sorted) order.
/// An open port's error column is left empty.
pub fn write_csv(path: &Path, report: &ScanReport) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(file));

    wtr.write_record(["port", "open", "error"])?;
    for r in &report.results {
        wtr.write_record([
            r.port.to_string().as_str(),
            if r.open { "true" } else { "false" },
            r.error.as_deref().unwrap_or(""),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("failed to flush CSV to {}", path.display()))?;
    Ok(())
}

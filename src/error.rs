use thiserror::Error;

/// Fatal scan-level errors. Per-port failures are never errors; they are
/// carried as data in [`crate::types::ProbeResult`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanError {
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
    #[error("scan interrupted")]
    Interrupted,
}

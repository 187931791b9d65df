use serde::{Deserialize, Serialize};

/// Outcome of a single TCP connect attempt against one port.
///
/// `open` and `error` are mutually exclusive: an open port carries no error,
/// a closed one always carries a classification string ("timeout", "refused",
/// an OS error message, or "unexpected:<message>").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub port: u16,
    pub open: bool,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn open(port: u16) -> Self {
        Self {
            port,
            open: true,
            error: None,
        }
    }

    pub fn closed(port: u16, error: impl Into<String>) -> Self {
        Self {
            port,
            open: false,
            error: Some(error.into()),
        }
    }
}

/// Final, timestamped scan outcome: one entry per scanned port, sorted
/// ascending by port number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub scanned_at: String,
    pub results: Vec<ProbeResult>,
}

impl ScanReport {
    /// Ports that accepted a connection, ascending (a subsequence of the
    /// sorted results).
    pub fn open_ports(&self) -> Vec<u16> {
        self.results
            .iter()
            .filter(|r| r.open)
            .map(|r| r.port)
            .collect()
    }
}

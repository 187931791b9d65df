use crate::types::{ProbeResult, ScanReport};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Turn the dispatcher's completion-order results into the final report:
/// stable-sorted ascending by port and stamped with the completion time.
pub fn aggregate(mut results: Vec<ProbeResult>) -> ScanReport {
    results.sort_by_key(|r| r.port);
    ScanReport {
        scanned_at: now_rfc3339(),
        results,
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ProbeResult> {
        vec![
            ProbeResult::closed(443, "timeout"),
            ProbeResult::open(22),
            ProbeResult::closed(80, "refused"),
        ]
    }

    #[test]
    fn results_are_sorted_by_port() {
        let report = aggregate(sample());
        let ports: Vec<u16> = report.results.iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![22, 80, 443]);
    }

    #[test]
    fn permuted_input_yields_identical_results() {
        let mut permuted = sample();
        permuted.reverse();
        assert_eq!(aggregate(sample()).results, aggregate(permuted).results);
    }

    #[test]
    fn open_ports_is_the_open_subsequence() {
        let mut results = sample();
        results.push(ProbeResult::open(8080));
        let report = aggregate(results);
        assert_eq!(report.open_ports(), vec![22, 8080]);
    }

    #[test]
    fn timestamp_is_utc_rfc3339() {
        let report = aggregate(Vec::new());
        assert!(report.scanned_at.ends_with('Z'), "{}", report.scanned_at);
        assert!(report.results.is_empty());
    }
}

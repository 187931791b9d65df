use crate::error::ScanError;
use crate::probe::probe;
use crate::types::ProbeResult;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Probe every port in `ports` against `ip`, at most `workers` connect
/// attempts in flight at once.
///
/// One task is spawned per port; a `Semaphore` sized to `workers` bounds
/// concurrency, so pending ports queue until a permit frees up. Results are
/// collected in completion order and each one is handed to `on_result`
/// exactly once, synchronously, before it is stored. Ordering across ports
/// is otherwise unspecified; callers wanting port order go through
/// [`crate::report::aggregate`].
///
/// Cancelling `cancel` aborts the scan: submission stops, outstanding probes
/// are dropped without being awaited, results collected so far are discarded,
/// and `ScanError::Interrupted` is returned. A `workers` of zero is rejected
/// before any work starts.
pub async fn dispatch<F>(
    ip: IpAddr,
    ports: &[u16],
    timeout: Duration,
    workers: usize,
    cancel: CancellationToken,
    mut on_result: F,
) -> Result<Vec<ProbeResult>, ScanError>
where
    F: FnMut(&ProbeResult),
{
    if workers == 0 {
        return Err(ScanError::InvalidWorkerCount);
    }

    let sem = Arc::new(Semaphore::new(workers));
    let mut set = JoinSet::new();
    for &port in ports {
        let sem = sem.clone();
        set.spawn(async move {
            // The permit is the worker slot; held for the whole attempt.
            let _permit = sem.acquire_owned().await.expect("semaphore in scope");
            probe(ip, port, timeout).await
        });
    }
    debug!(ports = ports.len(), workers, "scan dispatched");

    let mut results = Vec::with_capacity(ports.len());
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(collected = results.len(), "scan interrupted, discarding partial results");
                return Err(ScanError::Interrupted);
            }
            joined = set.join_next() => match joined {
                Some(Ok(res)) => {
                    on_result(&res);
                    results.push(res);
                }
                Some(Err(e)) => warn!(error = %e, "probe task failed to join"),
                None => break,
            },
        }
    }

    debug!(results = results.len(), "scan complete");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[tokio::test]
    async fn zero_workers_is_a_config_error() {
        let err = dispatch(
            LOCALHOST,
            &[80],
            Duration::from_millis(100),
            0,
            CancellationToken::new(),
            |_| {},
        )
        .await
        .unwrap_err();
        assert_eq!(err, ScanError::InvalidWorkerCount);
    }

    #[tokio::test]
    async fn cancelled_token_interrupts_before_results_surface() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = dispatch(
            LOCALHOST,
            &[1, 2, 3],
            Duration::from_millis(100),
            2,
            cancel,
            |_| panic!("observer must not fire on an interrupted scan"),
        )
        .await
        .unwrap_err();
        assert_eq!(err, ScanError::Interrupted);
    }

    #[tokio::test]
    async fn observer_fires_exactly_once_per_result() {
        let mut seen = Vec::new();
        let ports = [40000, 40001, 40002, 40003];
        let results = dispatch(
            LOCALHOST,
            &ports,
            Duration::from_millis(250),
            2,
            CancellationToken::new(),
            |r| seen.push(r.port),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), ports.len());
        assert_eq!(seen.len(), ports.len());
        let collected: Vec<u16> = results.iter().map(|r| r.port).collect();
        assert_eq!(seen, collected, "observer order must match collection order");
    }
}

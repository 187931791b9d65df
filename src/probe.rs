use crate::types::ProbeResult;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;

/// Attempt one TCP connect to `ip:port`, bounded by `timeout`.
///
/// The connection is dropped as soon as it is established; nothing is read
/// or written. This function never fails: every outcome, including OS-level
/// surprises, is folded into the returned [`ProbeResult`].
pub async fn probe(ip: IpAddr, port: u16, timeout: Duration) -> ProbeResult {
    let addr = SocketAddr::new(ip, port);
    match time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeResult::open(port)
        }
        Err(_elapsed) => ProbeResult::closed(port, "timeout"),
        Ok(Err(e)) => ProbeResult::closed(port, classify(&e)),
    }
}

/// Map a connect error onto the closed-port taxonomy: "refused" for an
/// explicit RST, the OS message for other network-level failures, and an
/// "unexpected:" fallback for anything without an OS-level cause.
fn classify(e: &io::Error) -> String {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => "refused".to_string(),
        io::ErrorKind::TimedOut => "timeout".to_string(),
        _ if e.raw_os_error().is_some() => e.to_string(),
        _ => format!("unexpected:{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_is_classified() {
        let e = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        assert_eq!(classify(&e), "refused");
    }

    #[test]
    fn os_level_timeout_is_classified() {
        let e = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert_eq!(classify(&e), "timeout");
    }

    #[test]
    fn os_errors_keep_their_message() {
        let e = io::Error::from_raw_os_error(libc_enetunreach());
        let msg = classify(&e);
        assert!(!msg.is_empty());
        assert_ne!(msg, "refused");
        assert!(!msg.starts_with("unexpected:"));
    }

    #[test]
    fn non_os_errors_fall_back_to_unexpected() {
        let e = io::Error::new(io::ErrorKind::Other, "something odd");
        assert_eq!(classify(&e), "unexpected:something odd");
    }

    // ENETUNREACH without pulling in libc just for a test.
    fn libc_enetunreach() -> i32 {
        101
    }
}

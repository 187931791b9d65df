use std::collections::BTreeSet;

/// Parse a port spec string into a deduplicated, ascending list of TCP ports.
///
/// Supported tokens, comma-separated:
/// - single port number: `80`
/// - inclusive range: `8000-8010` (reversed bounds are swapped, out-of-range
///   bounds are clamped to 1..=65535)
///
/// This parser never fails: malformed tokens are skipped, a missing or empty
/// spec yields [`default_ports`]. An empty result is possible (e.g. every
/// token was malformed) and is the caller's problem to reject.
pub fn parse_port_spec(spec: Option<&str>) -> Vec<u16> {
    let spec = match spec {
        Some(s) if !s.trim().is_empty() => s,
        _ => return default_ports(),
    };

    let mut set = BTreeSet::new();
    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some((a, b)) = token.split_once('-') {
            let (Ok(a), Ok(b)) = (a.trim().parse::<i64>(), b.trim().parse::<i64>()) else {
                continue;
            };
            let (mut lo, mut hi) = if a > b { (b, a) } else { (a, b) };
            lo = lo.max(1);
            hi = hi.min(65535);
            if lo <= hi {
                set.extend((lo as u16)..=(hi as u16));
            }
            continue;
        }

        if let Ok(p) = token.parse::<i64>() {
            if (1..=65535).contains(&p) {
                set.insert(p as u16);
            }
        }
    }

    set.into_iter().collect()
}

/// The ports probed when no spec is given: a small list of commonly exposed
/// services (FTP, SSH, telnet, SMTP, DNS, HTTP(S), POP3, IMAP, SMB, MySQL,
/// RDP).
pub fn default_ports() -> Vec<u16> {
    const DEFAULT: &[u16] = &[21, 22, 23, 25, 53, 80, 110, 143, 443, 445, 3306, 3389];
    DEFAULT.to_vec()
}

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Pre-flight reachability check, polled before every fetch.
pub trait Connectivity: Send + Sync {
    fn is_network_reachable(&self) -> bool;
}

/// Reports reachable when a TCP connection to the endpoint host succeeds.
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Probe for the host and port of an absolute URL.
    pub fn for_endpoint(endpoint: &str, timeout: Duration) -> Option<Self> {
        let url = url::Url::parse(endpoint).ok()?;
        let host = url.host_str()?.to_string();
        let port = url.port_or_known_default()?;
        Some(Self::new(host, port, timeout))
    }
}

impl Connectivity for TcpProbe {
    fn is_network_reachable(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!(host = %self.host, error = %e, "could not resolve endpoint host");
                return false;
            }
        };
        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                return true;
            }
        }
        debug!(host = %self.host, port = self.port, "endpoint host unreachable");
        false
    }
}

/// Skips the pre-flight check.
pub struct AlwaysReachable;

impl Connectivity for AlwaysReachable {
    fn is_network_reachable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn endpoint_port_defaults_from_scheme() {
        let probe = TcpProbe::for_endpoint("https://content.guardianapis.com/search", Duration::from_secs(1)).unwrap();
        assert_eq!(probe.host, "content.guardianapis.com");
        assert_eq!(probe.port, 443);
    }

    #[test]
    fn relative_endpoint_has_no_probe() {
        assert!(TcpProbe::for_endpoint("/search", Duration::from_secs(1)).is_none());
    }

    #[test]
    fn listening_socket_is_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let probe = TcpProbe::new("127.0.0.1", port, Duration::from_secs(1));
        assert!(probe.is_network_reachable());
    }

    #[test]
    fn closed_port_is_unreachable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let probe = TcpProbe::new("127.0.0.1", port, Duration::from_millis(200));
        assert!(!probe.is_network_reachable());
    }
}

// ── Runtime connection configuration ──
//
// These types describe *how* to reach the router. They carry the admin
// password and connection tuning, but never touch disk. The CLI builds a
// `RouterConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use vrd_api::{TlsMode, TransportConfig};

/// Interface the router reports for the coax/ethernet WAN uplink.
pub const DEFAULT_NETWORK_NAME: &str = "Broadband Connection (Ethernet/Coax)";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Built-in root store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Opt-in: the router's certificate is usually
    /// self-signed and issued for a name it is not reached by.
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Configuration for talking to a single router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Router admin URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Admin password, sent only as a salted hash.
    pub password: SecretString,
    /// Name of the network whose address is published.
    pub network_name: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Trace every HTTP exchange including headers and cookies.
    pub trace_http: bool,
}

impl RouterConfig {
    pub fn new(url: Url, password: SecretString) -> Self {
        Self {
            url,
            password,
            network_name: DEFAULT_NETWORK_NAME.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            trace_http: false,
        }
    }

    /// Transport settings for the router client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
            cookie_jar: None,
            trace_http: self.trace_http,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_and_quiet() {
        let cfg = RouterConfig::new(
            "https://192.168.1.1".parse().unwrap(),
            SecretString::from(String::new()),
        );
        assert_eq!(cfg.network_name, DEFAULT_NETWORK_NAME);
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);

        let transport = cfg.transport();
        assert_eq!(transport.tls, TlsMode::System);
        assert!(!transport.trace_http);
        assert_eq!(transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn tls_maps_to_transport_mode() {
        assert_eq!(
            TlsMode::from(&TlsVerification::CustomCa("/etc/router.pem".into())),
            TlsMode::CustomCa("/etc/router.pem".into())
        );
        assert_eq!(
            TlsMode::from(&TlsVerification::DangerAcceptInvalid),
            TlsMode::DangerAcceptInvalid
        );
    }
}

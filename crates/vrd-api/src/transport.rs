// Transport configuration for building the router's reqwest::Client.
//
// TLS trust, timeout, the session cookie jar, and opt-in HTTP tracing all
// live here so the router client only deals with the handshake itself.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use tracing::trace;

use crate::error::Error;

const USER_AGENT: &str = concat!("vrd/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the built-in root certificate store.
    #[default]
    System,
    /// Trust the CA certificate(s) in the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (routers ship self-signed certs).
    DangerAcceptInvalid,
}

/// Transport configuration for the router HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
    /// Log method, URL, headers and cookies of every exchange at `trace`.
    /// Credentials and tokens pass through these, so this is off unless
    /// the caller asks for it.
    pub trace_http: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            cookie_jar: None,
            trace_http: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                tracing::info!(ca_cert = %path.display(), "setting explicit CA certificate");
                let cert_pem = std::fs::read(path).map_err(|e| {
                    Error::Tls(format!("failed to read CA cert {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

// ── Cookie helpers ──────────────────────────────────────────────────

/// Split a `Cookie` header value (`a=1; b=2`) into name/value pairs.
pub(crate) fn cookie_pairs(header: &str) -> impl Iterator<Item = (&str, &str)> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
}

/// All cookies the jar would send to `url`, as name/value pairs.
pub(crate) fn jar_cookies(jar: &Jar, url: &url::Url) -> BTreeMap<String, String> {
    jar.cookies(url)
        .and_then(|value| value.to_str().ok().map(String::from))
        .map(|header| {
            cookie_pairs(&header)
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect()
        })
        .unwrap_or_default()
}

// ── HTTP tracing ────────────────────────────────────────────────────

/// Log an outgoing request. Cookies come from the jar because reqwest
/// attaches them after this point.
pub(crate) fn trace_request(request: &reqwest::Request, jar: &Jar) {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in request.headers() {
        headers
            .entry(name.as_str().to_owned())
            .or_default()
            .push(value.to_str().unwrap_or("<binary>").to_owned());
    }
    let cookies = jar_cookies(jar, request.url());

    trace!(
        method = %request.method(),
        url = %request.url(),
        headers = ?headers,
        cookies = ?cookies,
        "request"
    );
}

/// Log the cookies a response sets.
pub(crate) fn trace_response(response: &reqwest::Response) {
    let cookies: BTreeMap<String, String> = response
        .cookies()
        .map(|c| (c.name().to_owned(), c.value().to_owned()))
        .collect();

    trace!(
        status = response.status().as_u16(),
        url = %response.url(),
        cookies = ?cookies,
        "response"
    );
}

// Router HTTP client
//
// Wraps `reqwest::Client` with router URL construction, the shared cookie
// jar, and opt-in exchange tracing. The login handshake and the network
// listing are implemented as inherent methods in `auth.rs` and
// `network.rs` to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::Jar;
use secrecy::SecretString;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::router::models::ApiMetadata;
use crate::transport::{self, TransportConfig};

/// Router address used when none is configured.
pub const DEFAULT_ROUTER_HOST: &str = "192.168.1.1";

/// Where a [`RouterClient`] is in the login handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing sent yet.
    Unauthenticated,
    /// `GET /api` answered with a usable salt.
    MetadataFetched,
    /// `POST /api/login` accepted the credential.
    Authenticated,
    /// A handshake step failed; the session is unusable.
    Failed,
}

/// Turn a configured router host into the base URL of its admin UI.
///
/// A bare host (`192.168.1.1`, `router.lan:8443`) gets `https://`; a value
/// that already carries a scheme is used as-is.
pub fn router_url(host: &str) -> Result<Url, Error> {
    let host = host.trim();
    let host = if host.is_empty() {
        DEFAULT_ROUTER_HOST
    } else {
        host
    };
    if host.contains("://") {
        Ok(Url::parse(host)?)
    } else {
        Ok(Url::parse(&format!("https://{host}"))?)
    }
}

/// Stateful session with a single router.
///
/// One handle, one handshake: [`login`](Self::login) takes `&mut self`, so
/// only one authentication sequence can be in flight at a time. Release
/// the pooled connections with [`close`](Self::close) when done.
pub struct RouterClient {
    http: reqwest::Client,
    base_url: Url,
    password: SecretString,
    cookie_jar: Arc<Jar>,
    trace_http: bool,
    state: SessionState,
    metadata: Option<ApiMetadata>,
}

impl RouterClient {
    /// Create a new router client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// (the router's session lives entirely in cookies). Passing a jar in
    /// lets the caller keep a handle on the same session store.
    pub fn new(
        base_url: Url,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let cookie_jar = transport
            .cookie_jar
            .clone()
            .unwrap_or_else(|| Arc::new(Jar::default()));
        let config = TransportConfig {
            cookie_jar: Some(Arc::clone(&cookie_jar)),
            ..transport.clone()
        };
        let http = config.build_client()?;

        Ok(Self {
            http,
            base_url,
            password,
            cookie_jar,
            trace_http: config.trace_http,
            state: SessionState::Unauthenticated,
            metadata: None,
        })
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current handshake state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Metadata from the last successful handshake.
    pub fn metadata(&self) -> Option<&ApiMetadata> {
        self.metadata.as_ref()
    }

    /// Release pooled connections and drop the session.
    pub fn close(self) {
        debug!(router = %self.base_url, "closing router session");
    }

    // ── Crate-internal accessors ─────────────────────────────────────

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    pub(crate) fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookie_jar
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        debug!(from = ?self.state, to = ?state, "session state");
        self.state = state;
    }

    pub(crate) fn set_metadata(&mut self, metadata: ApiMetadata) {
        self.metadata = Some(metadata);
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api{path}`. `path` is empty or starts with `/`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api{path}"))?)
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Send a request, tracing the exchange when enabled.
    pub(crate) async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let request = builder.build()?;
        debug!("{} {}", request.method(), request.url());

        if self.trace_http {
            transport::trace_request(&request, &self.cookie_jar);
        }

        let resp = self.http.execute(request).await?;

        if self.trace_http {
            transport::trace_response(&resp);
        }
        Ok(resp)
    }
}

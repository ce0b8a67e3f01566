use thiserror::Error;

/// Top-level error type for the `vrd-api` crate.
///
/// Covers transport setup, the login handshake, and the protected
/// endpoints. `vrd-core` wraps these with the operation that failed.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error (unreadable or invalid CA certificate).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Handshake ───────────────────────────────────────────────────
    /// The metadata endpoint did not report a password salt.
    #[error("unable to detect password salt: {body}")]
    MissingPasswordSalt { body: String },

    /// The router rejected the salted credential.
    #[error("login failed: HTTP {status}")]
    LoginFailed { status: u16, body: String },

    // ── Protected endpoints ─────────────────────────────────────────
    /// No `XSRF-TOKEN` cookie in the session jar after login.
    #[error("did not find XSRF-TOKEN cookie in session")]
    MissingXsrfToken,

    /// The `XSRF-TOKEN` cookie holds bytes that cannot go in a header.
    #[error("XSRF-TOKEN cookie is not a valid header value")]
    InvalidXsrfToken,

    /// A protected endpoint answered with something other than 200.
    #[error("{endpoint} not success: HTTP {status}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("unmarshal {endpoint}: {message} (body: {body})")]
    Deserialization {
        endpoint: &'static str,
        message: String,
        body: String,
    },
}

impl Error {
    /// Returns `true` when the router answered but did not behave the way
    /// the handshake expects (as opposed to a transport or setup failure).
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::MissingPasswordSalt { .. }
                | Self::LoginFailed { .. }
                | Self::MissingXsrfToken
                | Self::InvalidXsrfToken
                | Self::UnexpectedStatus { .. }
                | Self::Deserialization { .. }
        )
    }

    /// Returns `true` if the router refused the credential or the session:
    /// a 401 or 403 from login or a protected endpoint.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::LoginFailed { .. } | Self::UnexpectedStatus { .. })
            && matches!(self.status(), Some(401 | 403))
    }

    /// The HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::LoginFailed { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

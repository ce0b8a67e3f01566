//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vrd_config::ConfigError;
use vrd_core::{ApiError, CoreError, PublishError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const PROVIDER: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("connect: could not reach the router")]
    #[diagnostic(
        code(vrd::connection_failed),
        help(
            "Check that the router is reachable and the host is right.\n\
             Set it with --router or router.host in the config file."
        )
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("connect: TLS verification of the router certificate failed")]
    #[diagnostic(
        code(vrd::tls_error),
        help(
            "The router usually presents a self-signed certificate.\n\
             Pass its CA with --ca-cert, or accept it with --insecure (-k)."
        )
    )]
    TlsError {
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("{operation}: the router rejected the session")]
    #[diagnostic(
        code(vrd::auth_failed),
        help("Verify the router admin password (--router-password or VRD_ROUTER_PASSWORD).")
    )]
    AuthFailed {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("no {what} configured")]
    #[diagnostic(code(vrd::no_credentials), help("{hint}"))]
    NoCredentials {
        what: &'static str,
        hint: &'static str,
    },

    // ── Router protocol ──────────────────────────────────────────────
    #[error("{operation}: {source}")]
    #[diagnostic(
        code(vrd::router_protocol),
        help("The router answered unexpectedly. Rerun with --trace-http -vvv for the full exchange.")
    )]
    RouterProtocol {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    // ── Network lookup ───────────────────────────────────────────────
    #[error("network {name} not found")]
    #[diagnostic(
        code(vrd::network_not_found),
        help("Run: vrd networks to see the names the router reports, then pass --network-name")
    )]
    NetworkNotFound { name: String },

    #[error("network {name} does not have IP address")]
    #[diagnostic(
        code(vrd::no_ip_address),
        help("The interface exists but is unaddressed; check the router's WAN link.")
    )]
    NoIpAddress { name: String },

    #[error("network {name} reports an invalid IPv4 address: {value}")]
    #[diagnostic(code(vrd::invalid_ip_address))]
    InvalidIpAddress { name: String, value: String },

    // ── DNS updates ──────────────────────────────────────────────────
    #[error("at least one dns update required")]
    #[diagnostic(
        code(vrd::no_updates),
        help(
            "Pass --updates '{{\"domains\":{{\"home\":{{\"name\":\"example.com\",\"hosts\":[\"@\"]}}}}}}'\n\
             or add [[updates]] entries to the config file."
        )
    )]
    NoUpdates,

    #[error("update {domain}: {source}")]
    #[diagnostic(code(vrd::provider_error))]
    Provider {
        domain: String,
        #[source]
        source: PublishError,
    },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vrd::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(vrd::no_config),
        help("Check the --config path, or omit it to use the default location.")
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(vrd::config))]
    Config(ConfigError),

    // ── IO / Serialization ──────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(vrd::io))]
    Io(#[from] std::io::Error),

    #[error("failed to render output: {0}")]
    #[diagnostic(code(vrd::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NetworkNotFound { .. } | Self::NoIpAddress { .. } => exit_code::NOT_FOUND,
            Self::NoUpdates | Self::Validation { .. } => exit_code::USAGE,
            Self::Provider { .. } => exit_code::PROVIDER,
            _ => exit_code::GENERAL,
        }
    }

    /// Classify a router-side failure of `operation`.
    fn from_api(operation: &'static str, source: ApiError) -> Self {
        if source.is_auth_rejected() {
            return Self::AuthFailed { operation, source };
        }
        if source.is_protocol() {
            return Self::RouterProtocol { operation, source };
        }
        match source {
            ApiError::Transport(ref e) if is_certificate_error(e) => Self::TlsError { source },
            ApiError::InvalidUrl(ref e) => Self::Validation {
                field: "router".into(),
                reason: e.to_string(),
            },
            source => Self::ConnectionFailed { source },
        }
    }
}

/// Walk the source chain looking for a certificate failure.
fn is_certificate_error(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let msg = e.to_string().to_lowercase();
        if msg.contains("certificate") || msg.contains("unknownissuer") {
            return true;
        }
        current = e.source();
    }
    false
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Connect(source) => Self::from_api("connect", source),
            CoreError::Network(source) => Self::from_api("network", source),
            CoreError::NetworkNotFound { name } => Self::NetworkNotFound { name },
            CoreError::NoIpAddress { name } => Self::NoIpAddress { name },
            CoreError::InvalidIpAddress { name, value } => Self::InvalidIpAddress { name, value },
            CoreError::NoUpdates => Self::NoUpdates,
            CoreError::Publish { domain, source } => Self::Provider { domain, source },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::MissingCredential { what, hint } => Self::NoCredentials { what, hint },
            ConfigError::NotFound { path } => Self::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::InvalidUpdates(e) => Self::Validation {
                field: "--updates".into(),
                reason: format!("unmarshal dns updates: {e}"),
            },
            other => Self::Config(other),
        }
    }
}

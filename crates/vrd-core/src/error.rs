// ── Core error types ──
//
// Every variant names the operation that failed. Router-side failures are
// kept as the `vrd_api::Error` source so callers can still classify them
// (transport vs. protocol); lookup failures on a successful exchange get
// their own variants.

use thiserror::Error;

use crate::dns::PublishError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Router exchange ──────────────────────────────────────────────
    #[error("connect: {0}")]
    Connect(#[source] vrd_api::Error),

    #[error("network: {0}")]
    Network(#[source] vrd_api::Error),

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("network {name} not found")]
    NetworkNotFound { name: String },

    #[error("network {name} does not have IP address")]
    NoIpAddress { name: String },

    #[error("network {name} reports an invalid IPv4 address: {value}")]
    InvalidIpAddress { name: String, value: String },

    // ── DNS publishing ───────────────────────────────────────────────
    #[error("at least one dns update required")]
    NoUpdates,

    #[error("update {domain}: {source}")]
    Publish {
        domain: String,
        #[source]
        source: PublishError,
    },
}

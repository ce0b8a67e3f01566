// vrd-namecheap: Namecheap DNS publisher
//
// Implements `vrd_core::DnsPublisher` on top of the Namecheap XML API's
// setHosts command.

pub mod config;
pub mod error;
pub mod publisher;
mod response;

pub use config::{DEFAULT_TTL, NamecheapConfig, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};
pub use error::{ApiMessage, NamecheapError};
pub use publisher::{NamecheapPublisher, split_domain};

/// Provider label used in logs and errors.
pub const PROVIDER_NAME: &str = "namecheap";

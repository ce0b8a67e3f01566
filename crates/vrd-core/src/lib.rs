// vrd-core: External IP resolution and DNS publishing
//
// Drives a `vrd_api::RouterClient` through login and network listing,
// selects the configured network, and hands its address to a
// `DnsPublisher`.

pub mod config;
pub mod dns;
pub mod error;
pub mod resolve;
pub mod router;
pub mod sync;

pub use config::{DEFAULT_NETWORK_NAME, RouterConfig, TlsVerification};
pub use dns::{
    DnsPublisher, DnsUpdateRequest, DomainResult, DryRunPublisher, PublishError, PublishReport,
    publish,
};
pub use error::CoreError;
pub use resolve::{external_ip, select_network};
pub use router::{RouterSession, list_networks, resolve_external_ip};
pub use sync::update_dns;

// Re-exported so downstream crates don't need a direct vrd-api dependency
// for the wire types.
pub use vrd_api::{DEFAULT_ROUTER_HOST, Error as ApiError, Network, router_url};

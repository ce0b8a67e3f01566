// vrd-api: Async client for the Verizon Fios router admin API

pub mod error;
pub mod router;
pub mod transport;

pub use error::Error;
pub use router::{
    ApiMetadata, DEFAULT_ROUTER_HOST, Network, RouterClient, SessionCredentials, SessionState,
    XSRF_COOKIE, XSRF_HEADER, XsrfToken, hash_password, router_url,
};
pub use transport::{TlsMode, TransportConfig};

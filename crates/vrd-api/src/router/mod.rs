// Router admin API client
//
// Hand-written client for the undocumented local API served by the
// router's web UI: salted login, cookie session, XSRF-protected reads.

pub mod auth;
pub mod client;
pub mod models;
pub mod network;

pub use auth::{SessionCredentials, XSRF_COOKIE, XsrfToken, hash_password};
pub use client::{DEFAULT_ROUTER_HOST, RouterClient, SessionState, router_url};
pub use models::{ApiMetadata, Network};
pub use network::XSRF_HEADER;

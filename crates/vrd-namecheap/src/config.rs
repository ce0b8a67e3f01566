use std::net::Ipv4Addr;
use std::time::Duration;

use secrecy::SecretString;

pub const PRODUCTION_ENDPOINT: &str = "https://api.namecheap.com/xml.response";
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.namecheap.com/xml.response";

/// TTL Namecheap applies when none is sent.
pub const DEFAULT_TTL: u32 = 1800;

/// Credentials and endpoint for the Namecheap XML API.
#[derive(Debug, Clone)]
pub struct NamecheapConfig {
    pub api_user: String,
    pub api_key: SecretString,
    /// Account the domains belong to. Defaults to `api_user`.
    pub username: Option<String>,
    /// Whitelisted address the API call is made from. Defaults to the
    /// address being published.
    pub client_ip: Option<Ipv4Addr>,
    /// XML API URL. Parsed when the publisher is built.
    pub endpoint: String,
    pub ttl: u32,
    pub timeout: Duration,
}

impl NamecheapConfig {
    pub fn new(api_user: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            api_user: api_user.into(),
            api_key,
            username: None,
            client_ip: None,
            endpoint: PRODUCTION_ENDPOINT.into(),
            ttl: DEFAULT_TTL,
            timeout: Duration::from_secs(30),
        }
    }

    /// Point at the sandbox API instead of production.
    pub fn sandbox(mut self) -> Self {
        self.endpoint = SANDBOX_ENDPOINT.into();
        self
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.api_user)
    }
}

// ── Router session lifecycle ──
//
// Owns one `RouterClient` from login to close. Every public entry point
// here runs the whole sequence (connect, list, close) so the session is
// always released, including when the listing fails.

use std::net::Ipv4Addr;

use tracing::{debug, info};

use vrd_api::{Network, RouterClient, SessionCredentials};

use crate::config::RouterConfig;
use crate::error::CoreError;
use crate::resolve::external_ip;

/// An authenticated router session.
pub struct RouterSession {
    client: RouterClient,
    credentials: SessionCredentials,
}

impl RouterSession {
    /// Build the transport and run the login handshake.
    pub async fn connect(config: &RouterConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let mut client = RouterClient::new(config.url.clone(), config.password.clone(), &transport)
            .map_err(CoreError::Connect)?;

        let credentials = client.login().await.map_err(CoreError::Connect)?;
        debug!(cookies = ?credentials.cookie_names(), "router session established");

        Ok(Self {
            client,
            credentials,
        })
    }

    /// List the networks the router reports.
    pub async fn networks(&self) -> Result<Vec<Network>, CoreError> {
        self.client
            .networks(&self.credentials)
            .await
            .map_err(CoreError::Network)
    }

    /// Release the session's connections.
    pub fn close(self) {
        self.client.close();
    }
}

/// Log in, fetch the network list, and close the session.
pub async fn list_networks(config: &RouterConfig) -> Result<Vec<Network>, CoreError> {
    let session = RouterSession::connect(config).await?;
    let result = session.networks().await;
    session.close();
    result
}

/// Resolve the external IPv4 address of the configured network.
pub async fn resolve_external_ip(config: &RouterConfig) -> Result<Ipv4Addr, CoreError> {
    let networks = list_networks(config).await?;
    let ip = external_ip(&networks, &config.network_name)?;
    info!(network = %config.network_name, %ip, "resolved external ip");
    Ok(ip)
}

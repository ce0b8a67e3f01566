// Protected network listing
//
// Needs a logged-in session: the XSRF token from the session cookies is
// echoed in `X-XSRF-TOKEN`, and the session cookies ride along via the jar.

use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use tracing::{debug, trace};

use crate::error::Error;
use crate::router::auth::SessionCredentials;
use crate::router::client::RouterClient;
use crate::router::models::Network;

/// Header the router checks against the `XSRF-TOKEN` cookie.
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

impl RouterClient {
    /// List the router's configured networks.
    ///
    /// `GET /api/network`
    ///
    /// Fails before sending anything if the session carries no XSRF token.
    pub async fn networks(&self, credentials: &SessionCredentials) -> Result<Vec<Network>, Error> {
        let token = credentials.xsrf_token()?;
        let mut value =
            HeaderValue::from_str(token.expose()).map_err(|_| Error::InvalidXsrfToken)?;
        value.set_sensitive(true);

        let url = self.api_url("/network")?;
        let resp = self
            .execute(self.http().get(url).header(XSRF_HEADER, value))
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                endpoint: "network",
                status: status.as_u16(),
                body,
            });
        }

        let networks: Vec<Network> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                endpoint: "network",
                message: e.to_string(),
                body: body.clone(),
            })?;

        debug!(count = networks.len(), "received networks");
        for network in &networks {
            trace!(?network, "network");
        }
        Ok(networks)
    }
}

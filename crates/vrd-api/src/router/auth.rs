// Router login handshake
//
// Two steps, strictly in order:
// 1. `GET /api` (unauthenticated) yields metadata with a password salt.
// 2. `POST /api/login` with `hex(sha512(password + salt))`.
// The router answers step 2 with session cookies only; they land in the
// client's jar and are handed back as `SessionCredentials`.

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::Jar;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use sha2::{Digest, Sha512};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::router::client::{RouterClient, SessionState};
use crate::router::models::ApiMetadata;
use crate::transport::jar_cookies;

/// Name of the cookie (and, with an `X-` prefix, the header) carrying the
/// anti-forgery token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Hash the admin password the way the router's web UI does:
/// lower-case `hex(sha512(password || salt))`.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// The anti-forgery token the router expects echoed in `X-XSRF-TOKEN`.
#[derive(Clone)]
pub struct XsrfToken(SecretString);

impl XsrfToken {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for XsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("XsrfToken(<redacted>)")
    }
}

/// Proof of a successful login: the cookie jar the router populated,
/// scoped to the router's API path.
///
/// Returned by [`RouterClient::login`] and required by
/// [`RouterClient::networks`], so protected calls cannot be made without
/// having authenticated first.
#[derive(Clone)]
pub struct SessionCredentials {
    cookies: Arc<Jar>,
    scope: Url,
}

impl SessionCredentials {
    pub(crate) fn new(cookies: Arc<Jar>, scope: Url) -> Self {
        Self { cookies, scope }
    }

    /// The URL the session cookies are looked up against.
    pub fn scope(&self) -> &Url {
        &self.scope
    }

    /// Names of the cookies the router set for the API scope.
    pub fn cookie_names(&self) -> Vec<String> {
        jar_cookies(&self.cookies, &self.scope).into_keys().collect()
    }

    /// Pull the `XSRF-TOKEN` cookie out of the session.
    ///
    /// Its absence means the login did not establish a protected session;
    /// that is terminal, not something to retry.
    pub fn xsrf_token(&self) -> Result<XsrfToken, Error> {
        let cookies = jar_cookies(&self.cookies, &self.scope);
        match cookies.get(XSRF_COOKIE) {
            Some(value) if !value.is_empty() => {
                debug!("found xsrf token in session cookies");
                Ok(XsrfToken(SecretString::from(value.clone())))
            }
            _ => Err(Error::MissingXsrfToken),
        }
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("scope", &self.scope.as_str())
            .field("cookies", &self.cookie_names())
            .finish()
    }
}

impl RouterClient {
    /// Authenticate with the router.
    ///
    /// Fetches a fresh salt, then posts the salted hash. Every step is
    /// fatal on first failure and leaves the session in
    /// [`SessionState::Failed`]; callers wanting resilience retry the whole
    /// call with a fresh client.
    pub async fn login(&mut self) -> Result<SessionCredentials, Error> {
        match self.handshake().await {
            Ok(credentials) => Ok(credentials),
            Err(e) => {
                self.set_state(SessionState::Failed);
                Err(e)
            }
        }
    }

    async fn handshake(&mut self) -> Result<SessionCredentials, Error> {
        let metadata = self.fetch_metadata().await?;
        self.set_state(SessionState::MetadataFetched);

        self.post_login(&metadata.password_salt).await?;
        self.set_metadata(metadata);
        self.set_state(SessionState::Authenticated);

        Ok(SessionCredentials::new(
            Arc::clone(self.cookie_jar()),
            self.api_url("")?,
        ))
    }

    /// Fetch the unauthenticated API metadata.
    ///
    /// `GET /api`
    ///
    /// The status code is ignored: the router returns the metadata body
    /// even with a 401.
    pub async fn fetch_metadata(&self) -> Result<ApiMetadata, Error> {
        let url = self.api_url("")?;
        let resp = self.execute(self.http().get(url)).await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), "received api metadata");

        let metadata: ApiMetadata =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                endpoint: "api",
                message: e.to_string(),
                body: body.clone(),
            })?;

        if metadata.password_salt.is_empty() {
            return Err(Error::MissingPasswordSalt { body });
        }
        Ok(metadata)
    }

    /// `POST /api/login` with the salted credential. Only a 200 counts.
    async fn post_login(&self, salt: &str) -> Result<(), Error> {
        let url = self.api_url("/login")?;
        let credential = hash_password(self.password().expose_secret(), salt);
        trace!(credential_len = credential.len(), "sending login");

        let body = json!({ "password": credential });
        let resp = self.execute(self.http().post(url).json(&body)).await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::LoginFailed {
                status: status.as_u16(),
                body,
            });
        }

        debug!("authentication successful");
        Ok(())
    }
}

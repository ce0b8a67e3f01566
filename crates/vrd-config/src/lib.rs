//! Configuration for vrd.
//!
//! TOML file + `VRD_` environment, credential resolution (env + plaintext),
//! and translation to `vrd_core::RouterConfig` and
//! `vrd_namecheap::NamecheapConfig`. CLI flags are applied by the binary on
//! top of the loaded [`Config`] before translation.

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vrd_core::{
    DEFAULT_NETWORK_NAME, DEFAULT_ROUTER_HOST, DnsUpdateRequest, RouterConfig, TlsVerification,
};
use vrd_namecheap::NamecheapConfig;

mod updates;

pub use updates::{UpdatesDomain, UpdatesPayload};

const REDACTED: &str = "<redacted>";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {what} configured")]
    MissingCredential { what: &'static str, hint: &'static str },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unmarshal dns updates: {0}")]
    InvalidUpdates(#[source] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterSection,

    #[serde(default)]
    pub namecheap: NamecheapSection,

    /// Domains updated when `--updates` is not given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<DomainUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterSection {
    /// Router host or URL (e.g., "192.168.1.1", "https://router.lan").
    #[serde(default = "default_host")]
    pub host: String,

    /// Admin password (plaintext -- prefer `password_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name containing the admin password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Path to the CA certificate the router's TLS cert is checked against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Accept any router certificate.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Network whose address is published.
    #[serde(default = "default_network_name")]
    pub network_name: String,
}

impl Default for RouterSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: false,
            timeout: default_timeout(),
            network_name: default_network_name(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_ROUTER_HOST.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_network_name() -> String {
    DEFAULT_NETWORK_NAME.into()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamecheapSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_user: Option<String>,

    /// API key (plaintext -- prefer `api_key_env`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Account owning the domains. Defaults to `api_user`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Whitelisted client address. Defaults to the published address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<Ipv4Addr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Use the Namecheap sandbox API.
    #[serde(default)]
    pub sandbox: bool,
}

/// One `[[updates]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DomainUpdate {
    pub domain: String,
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl Config {
    /// The `[[updates]]` entries as a publish request.
    pub fn update_request(&self) -> DnsUpdateRequest {
        let mut request = DnsUpdateRequest::new();
        for update in &self.updates {
            request.add(
                update.domain.trim(),
                update.hosts.iter().map(|h| h.trim().to_owned()),
            );
        }
        request
    }

    /// Copy with every secret value replaced, for display.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.router.password.is_some() {
            cfg.router.password = Some(REDACTED.into());
        }
        if cfg.namecheap.api_key.is_some() {
            cfg.namecheap.api_key = Some(REDACTED.into());
        }
        cfg
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "vrd").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vrd");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Layered sources: defaults, then the TOML file, then `VRD_` env vars.
///
/// Only nested env keys (`VRD_ROUTER__HOST`) are read, so flat variables
/// such as `VRD_ROUTER_PASSWORD` stay reserved for CLI flags.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("VRD_")
                .filter(|key| key.as_str().contains("__"))
                .split("__"),
        )
}

/// Load the config from `path`, or from [`config_path`] when `None`.
///
/// A missing default file is not an error; a missing explicit one is.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let resolved = match path {
        Some(p) if !p.exists() => {
            return Err(ConfigError::NotFound {
                path: p.to_path_buf(),
            });
        }
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };
    Ok(figment(&resolved).extract()?)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the router admin password (no CLI flag step).
pub fn resolve_router_password(router: &RouterSection) -> Result<SecretString, ConfigError> {
    // 1. password_env -> env var lookup
    if let Some(ref env_name) = router.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Plaintext in config
    if let Some(ref pw) = router.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::MissingCredential {
        what: "router password",
        hint: "pass --router-password, set VRD_ROUTER_PASSWORD, or set router.password_env",
    })
}

/// Resolve the Namecheap API key (no CLI flag step).
pub fn resolve_namecheap_api_key(
    namecheap: &NamecheapSection,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = namecheap.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref key) = namecheap.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::MissingCredential {
        what: "namecheap api key",
        hint: "pass --namecheap-api-key, set VRD_NAMECHEAP_API_KEY, or set namecheap.api_key_env",
    })
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `RouterConfig` from the router section.
pub fn router_config(
    router: &RouterSection,
    password: SecretString,
    trace_http: bool,
) -> Result<RouterConfig, ConfigError> {
    let url = vrd_core::router_url(&router.host).map_err(|e| ConfigError::Validation {
        field: "router.host".into(),
        reason: format!("{} ({e})", router.host),
    })?;

    if router.network_name.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "router.network_name".into(),
            reason: "must not be empty".into(),
        });
    }

    let tls = if router.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = router.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(RouterConfig {
        url,
        password,
        network_name: router.network_name.clone(),
        tls,
        timeout: Duration::from_secs(router.timeout),
        trace_http,
    })
}

/// Build a `NamecheapConfig` from the namecheap section.
pub fn namecheap_config(
    namecheap: &NamecheapSection,
    api_key: SecretString,
) -> Result<NamecheapConfig, ConfigError> {
    let api_user = namecheap
        .api_user
        .clone()
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::MissingCredential {
            what: "namecheap api user",
            hint: "pass --namecheap-api-user or set namecheap.api_user",
        })?;

    let mut cfg = NamecheapConfig::new(api_user, api_key);
    cfg.username.clone_from(&namecheap.username);
    cfg.client_ip = namecheap.client_ip;
    if let Some(ttl) = namecheap.ttl {
        cfg.ttl = ttl;
    }
    if namecheap.sandbox {
        cfg = cfg.sandbox();
    }
    Ok(cfg)
}

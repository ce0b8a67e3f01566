// ── DNS publishing boundary ──
//
// The core resolves one address; publishers push it to a provider. A
// publisher owns its wire format and credentials, and only reports whether
// a domain's host set was applied.

use std::error::Error as StdError;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::CoreError;

/// Domains and the hostnames under each that should point at the resolved
/// address. Insertion order is publish order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsUpdateRequest {
    domains: IndexMap<String, Vec<String>>,
}

impl DnsUpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add hosts under `domain`. Hosts already listed are skipped.
    pub fn add<I, S>(&mut self, domain: impl Into<String>, hosts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.domains.entry(domain.into()).or_default();
        for host in hosts {
            let host = host.into();
            if !entry.contains(&host) {
                entry.push(host);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.domains
            .iter()
            .map(|(domain, hosts)| (domain.as_str(), hosts.as_slice()))
    }
}

/// Why a publisher could not apply a domain's hosts.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid domain {domain:?}")]
    InvalidDomain { domain: String },

    #[error("domain {domain} has no hosts")]
    NoHosts { domain: String },

    #[error("{provider}: {source}")]
    Provider {
        provider: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Pushes A records to a DNS provider.
#[async_trait]
pub trait DnsPublisher: Send + Sync {
    /// Short name used in logs and error messages.
    fn provider_name(&self) -> &'static str;

    /// Point every host in `hosts` under `domain` at `ip`.
    async fn set_hosts(&self, domain: &str, hosts: &[String], ip: Ipv4Addr)
    -> Result<(), PublishError>;
}

/// Logs what would be published and sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunPublisher;

#[async_trait]
impl DnsPublisher for DryRunPublisher {
    fn provider_name(&self) -> &'static str {
        "dry-run"
    }

    async fn set_hosts(
        &self,
        domain: &str,
        hosts: &[String],
        ip: Ipv4Addr,
    ) -> Result<(), PublishError> {
        info!(domain, ?hosts, %ip, "dry run: skipping dns update");
        Ok(())
    }
}

/// One applied domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainResult {
    pub domain: String,
    pub hosts: Vec<String>,
}

/// What a publish pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub provider: &'static str,
    pub ip: Ipv4Addr,
    pub domains: Vec<DomainResult>,
}

/// Publish `ip` for every domain in `request`, in order.
///
/// Stops at the first failing domain. Domains already applied stay applied.
pub async fn publish(
    publisher: &dyn DnsPublisher,
    request: &DnsUpdateRequest,
    ip: Ipv4Addr,
) -> Result<PublishReport, CoreError> {
    if request.is_empty() {
        return Err(CoreError::NoUpdates);
    }

    let provider = publisher.provider_name();
    let mut domains = Vec::with_capacity(request.len());

    for (domain, hosts) in request.iter() {
        if hosts.is_empty() {
            return Err(CoreError::Publish {
                domain: domain.to_owned(),
                source: PublishError::NoHosts {
                    domain: domain.to_owned(),
                },
            });
        }

        debug!(provider, domain, ?hosts, %ip, "updating dns hosts");
        publisher
            .set_hosts(domain, hosts, ip)
            .await
            .map_err(|source| CoreError::Publish {
                domain: domain.to_owned(),
                source,
            })?;
        info!(provider, domain, hosts = hosts.len(), %ip, "dns hosts updated");

        domains.push(DomainResult {
            domain: domain.to_owned(),
            hosts: hosts.to_vec(),
        });
    }

    Ok(PublishReport {
        provider,
        ip,
        domains,
    })
}

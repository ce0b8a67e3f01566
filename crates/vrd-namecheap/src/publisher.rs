// Namecheap `namecheap.domains.dns.setHosts` publisher
//
// setHosts replaces the whole host set of a domain: every host listed
// for a domain is sent in one call, each as an A record pointing at the
// resolved address.

use std::fmt;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{debug, trace};
use url::Url;

use vrd_core::{DnsPublisher, PublishError};

use crate::PROVIDER_NAME;
use crate::config::NamecheapConfig;
use crate::error::NamecheapError;
use crate::response::check_set_hosts;

const SET_HOSTS_COMMAND: &str = "namecheap.domains.dns.setHosts";

/// Split `example.co.uk` into `("example", "co.uk")`.
pub fn split_domain(domain: &str) -> Result<(&str, &str), PublishError> {
    let trimmed = domain.trim().trim_end_matches('.');
    match trimmed.split_once('.') {
        Some((sld, tld)) if !sld.is_empty() && !tld.is_empty() && !tld.starts_with('.') => {
            Ok((sld, tld))
        }
        _ => Err(PublishError::InvalidDomain {
            domain: domain.to_owned(),
        }),
    }
}

/// Publishes A records through the Namecheap XML API.
pub struct NamecheapPublisher {
    http: reqwest::Client,
    endpoint: Url,
    config: NamecheapConfig,
}

impl NamecheapPublisher {
    pub fn new(config: NamecheapConfig) -> Result<Self, NamecheapError> {
        if config.api_user.trim().is_empty() {
            return Err(NamecheapError::MissingCredential { field: "api user" });
        }
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(NamecheapError::MissingCredential { field: "api key" });
        }

        let endpoint = Url::parse(&config.endpoint)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("vrd/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    /// Form parameters for one setHosts call, credentials included.
    pub(crate) fn set_hosts_params(
        &self,
        sld: &str,
        tld: &str,
        hosts: &[String],
        ip: Ipv4Addr,
    ) -> Vec<(String, String)> {
        let client_ip = self.config.client_ip.unwrap_or(ip);
        let address = ip.to_string();
        let ttl = self.config.ttl.to_string();

        let mut params = vec![
            ("ApiUser".to_owned(), self.config.api_user.clone()),
            (
                "ApiKey".to_owned(),
                self.config.api_key.expose_secret().to_owned(),
            ),
            ("UserName".to_owned(), self.config.username().to_owned()),
            ("ClientIp".to_owned(), client_ip.to_string()),
            ("Command".to_owned(), SET_HOSTS_COMMAND.to_owned()),
            ("SLD".to_owned(), sld.to_owned()),
            ("TLD".to_owned(), tld.to_owned()),
        ];

        for (i, host) in hosts.iter().enumerate() {
            let n = i + 1;
            params.push((format!("HostName{n}"), host.clone()));
            params.push((format!("RecordType{n}"), "A".to_owned()));
            params.push((format!("Address{n}"), address.clone()));
            params.push((format!("TTL{n}"), ttl.clone()));
        }
        params
    }

    async fn send_set_hosts(
        &self,
        domain: &str,
        params: &[(String, String)],
    ) -> Result<(), NamecheapError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .form(params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        trace!(status = status.as_u16(), body = %body, "setHosts response");

        if !status.is_success() {
            return Err(NamecheapError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        check_set_hosts(&body, domain)
    }
}

impl fmt::Debug for NamecheapPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamecheapPublisher")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_user", &self.config.api_user)
            .field("api_key", &"<redacted>")
            .field("username", &self.config.username())
            .field("client_ip", &self.config.client_ip)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DnsPublisher for NamecheapPublisher {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn set_hosts(
        &self,
        domain: &str,
        hosts: &[String],
        ip: Ipv4Addr,
    ) -> Result<(), PublishError> {
        let (sld, tld) = split_domain(domain)?;
        debug!(
            endpoint = %self.endpoint,
            sld,
            tld,
            hosts = hosts.len(),
            %ip,
            "sending namecheap setHosts"
        );

        let params = self.set_hosts_params(sld, tld, hosts, ip);
        self.send_set_hosts(domain, &params).await?;
        Ok(())
    }
}

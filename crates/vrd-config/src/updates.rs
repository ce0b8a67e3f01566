// Wire schema of the `--updates` flag.
//
//   {"domains": {"home": {"name": "example.com", "hosts": ["@", "www"]}}}
//
// The map key is only a label; `name` is the domain sent to the provider.
// Kept apart from the `[[updates]]` file schema so either can change
// without the other.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use vrd_core::DnsUpdateRequest;

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdatesPayload {
    #[serde(default)]
    pub domains: IndexMap<String, UpdatesDomain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdatesDomain {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl UpdatesPayload {
    /// Add every domain to `request`. An empty `name` falls back to the
    /// entry's key.
    pub fn extend_request(&self, request: &mut DnsUpdateRequest) {
        for (key, domain) in &self.domains {
            let name = if domain.name.trim().is_empty() {
                key.as_str()
            } else {
                domain.name.trim()
            };
            request.add(name, domain.hosts.iter().map(|h| h.trim().to_owned()));
        }
    }
}

impl FromStr for UpdatesPayload {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(ConfigError::InvalidUpdates)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_flag_payload() {
        let payload: UpdatesPayload =
            r#"{"domains":{"home":{"name":"example.com","hosts":["@","www"]}}}"#
                .parse()
                .unwrap();

        let mut request = DnsUpdateRequest::new();
        payload.extend_request(&mut request);

        let entries: Vec<_> = request.iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "example.com");
        assert_eq!(entries[0].1, ["@", "www"]);
    }

    #[test]
    fn missing_name_uses_key() {
        let payload: UpdatesPayload = r#"{"domains":{"example.org":{"hosts":["vpn"]}}}"#
            .parse()
            .unwrap();
        let mut request = DnsUpdateRequest::new();
        payload.extend_request(&mut request);
        assert_eq!(request.iter().next().unwrap().0, "example.org");
    }

    #[test]
    fn keys_sharing_a_domain_merge() {
        let payload: UpdatesPayload = r#"{"domains":{
                "a":{"name":"example.com","hosts":["@"]},
                "b":{"name":"example.com","hosts":["www","@"]}
            }}"#
        .parse()
        .unwrap();
        let mut request = DnsUpdateRequest::new();
        payload.extend_request(&mut request);

        assert_eq!(request.len(), 1);
        assert_eq!(request.iter().next().unwrap().1, ["@", "www"]);
    }

    #[test]
    fn empty_payload_parses_to_nothing() {
        let payload: UpdatesPayload = "{}".parse().unwrap();
        assert!(payload.domains.is_empty());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let err = "not json".parse::<UpdatesPayload>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUpdates(_)));
        assert!(err.to_string().starts_with("unmarshal dns updates: "));
    }
}

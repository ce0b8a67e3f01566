// XML envelope returned by every Namecheap API command.
//
//   <ApiResponse Status="OK|ERROR">
//     <Errors><Error Number="...">message</Error></Errors>
//     <CommandResponse Type="namecheap.domains.dns.setHosts">
//       <DomainDNSSetHostsResult Domain="example.com" IsSuccess="true"/>
//     </CommandResponse>
//   </ApiResponse>
//
// Elements not listed here (Warnings, Server, ExecutionTime, ...) are ignored.

use serde::Deserialize;

use crate::error::{ApiMessage, NamecheapError};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(rename = "@Status")]
    pub status: String,
    #[serde(rename = "Errors", default)]
    pub errors: ErrorList,
    #[serde(rename = "CommandResponse")]
    pub command_response: Option<CommandResponse>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorList {
    #[serde(rename = "Error", default)]
    pub items: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorItem {
    #[serde(rename = "@Number", default)]
    pub number: String,
    #[serde(rename = "$text", default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommandResponse {
    #[serde(rename = "DomainDNSSetHostsResult")]
    pub set_hosts: Option<SetHostsResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetHostsResult {
    #[serde(rename = "@Domain", default)]
    pub domain: String,
    #[serde(rename = "@IsSuccess", default)]
    pub is_success: bool,
}

/// Parse a setHosts response and decide whether `domain` was applied.
pub(crate) fn check_set_hosts(body: &str, domain: &str) -> Result<(), NamecheapError> {
    let resp: ApiResponse = quick_xml::de::from_str(body).map_err(|e| NamecheapError::Xml {
        message: e.to_string(),
        body: body.to_owned(),
    })?;

    if !resp.status.eq_ignore_ascii_case("OK") {
        let errors = resp
            .errors
            .items
            .into_iter()
            .map(|e| ApiMessage {
                number: e.number,
                message: e.message.trim().to_owned(),
            })
            .collect();
        return Err(NamecheapError::Api { errors });
    }

    match resp.command_response.and_then(|c| c.set_hosts) {
        Some(result) if result.is_success => Ok(()),
        Some(result) => Err(NamecheapError::NotApplied {
            domain: if result.domain.is_empty() {
                domain.to_owned()
            } else {
                result.domain
            },
        }),
        None => Err(NamecheapError::NotApplied {
            domain: domain.to_owned(),
        }),
    }
}

// ── External IP resolution ──
//
// Picks the configured network out of the router's list and turns its
// address into the one value handed to DNS publishing.

use std::net::Ipv4Addr;

use tracing::{debug, warn};

use vrd_api::Network;

use crate::error::CoreError;

/// Find the first network whose name matches exactly.
///
/// Later entries with the same name are logged and ignored.
pub fn select_network<'a>(networks: &'a [Network], name: &str) -> Result<&'a Network, CoreError> {
    let mut matches = networks.iter().filter(|n| n.name == name);
    let selected = matches.next().ok_or_else(|| CoreError::NetworkNotFound {
        name: name.to_owned(),
    })?;

    for duplicate in matches {
        warn!(
            name,
            connection_id = duplicate.connection_id,
            ip = %duplicate.ip_address,
            "ignoring duplicate network entry"
        );
    }

    debug!(
        name,
        connection_id = selected.connection_id,
        connection_type = %selected.connection_type,
        "selected network"
    );
    Ok(selected)
}

/// Resolve the IPv4 address of the named network.
///
/// An interface can be present but unaddressed (link down); that is an
/// error, never an empty update.
pub fn external_ip(networks: &[Network], name: &str) -> Result<Ipv4Addr, CoreError> {
    let network = select_network(networks, name)?;
    let value = network.ip_address.trim();
    if value.is_empty() {
        return Err(CoreError::NoIpAddress {
            name: name.to_owned(),
        });
    }
    value.parse().map_err(|_| CoreError::InvalidIpAddress {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

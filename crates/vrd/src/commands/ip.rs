//! `vrd ip`: resolve and print the external address.

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ResolvedIp {
    network: String,
    ip: Ipv4Addr,
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let router = config::router_config(&cfg, global)?;

    let ip = vrd_core::resolve_external_ip(&router).await?;
    let resolved = ResolvedIp {
        network: router.network_name,
        ip,
    };

    let out = output::render_single(
        global.output,
        &resolved,
        |r| output::detail_lines(&[("Network", r.network.clone()), ("IP", r.ip.to_string())]),
        |r| r.ip.to_string(),
    )?;
    output::print_output(&out)
}

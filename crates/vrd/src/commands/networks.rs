//! `vrd networks`: list what the router reports.

use tabled::Tabled;

use vrd_core::Network;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Connection")]
    connection: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
    #[tabled(rename = "IPv6")]
    ipv6: String,
}

impl From<&Network> for NetworkRow {
    fn from(n: &Network) -> Self {
        Self {
            id: n.connection_id,
            name: n.name.clone(),
            connection: n.connection_type.clone(),
            ipv4: or_dash(&n.ip_address),
            ipv6: or_dash(&n.ipv6_address),
        }
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".into()
    } else {
        value.to_owned()
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let router = config::router_config(&cfg, global)?;

    let networks = vrd_core::list_networks(&router).await?;
    let out = output::render_list(
        global.output,
        &networks,
        |n| NetworkRow::from(n),
        |n| n.name.clone(),
    )?;
    output::print_output(&out)
}

//! `vrd namecheap`: one full dynamic-DNS pass against Namecheap.

use tabled::Tabled;
use tracing::info;

use vrd_core::{DomainResult, DryRunPublisher, PublishReport};
use vrd_namecheap::NamecheapPublisher;

use crate::cli::{GlobalOpts, NamecheapArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct UpdateRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Hosts")]
    hosts: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Provider")]
    provider: String,
}

pub async fn handle(args: &NamecheapArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load(global)?;
    config::apply_namecheap(&mut cfg, args);

    let request = config::update_request(&cfg, args)?;
    if request.is_empty() {
        return Err(CliError::NoUpdates);
    }
    let router = config::router_config(&cfg, global)?;

    let report = if args.dry_run {
        info!(domains = request.len(), "dry run, namecheap will not be called");
        vrd_core::update_dns(&router, &request, &DryRunPublisher).await?
    } else {
        let nc = config::namecheap_config(&cfg, args)?;
        let publisher = NamecheapPublisher::new(nc).map_err(|e| CliError::Validation {
            field: "namecheap".into(),
            reason: e.to_string(),
        })?;
        vrd_core::update_dns(&router, &request, &publisher).await?
    };

    render(global, &report)
}

fn render(global: &GlobalOpts, report: &PublishReport) -> Result<(), CliError> {
    let out = match global.output {
        crate::cli::OutputFormat::Json => serde_json::to_string_pretty(report)?,
        format => output::render_list(
            format,
            &report.domains,
            |d: &DomainResult| UpdateRow {
                domain: d.domain.clone(),
                hosts: d.hosts.join(", "),
                address: report.ip.to_string(),
                provider: report.provider.to_owned(),
            },
            |d| d.domain.clone(),
        )?,
    };
    output::print_output(&out)
}

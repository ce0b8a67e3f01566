// One dynamic-DNS pass: resolve the router's external address, then publish.

use tracing::info;

use crate::config::RouterConfig;
use crate::dns::{DnsPublisher, DnsUpdateRequest, PublishReport, publish};
use crate::error::CoreError;
use crate::router::resolve_external_ip;

/// Run a full update.
///
/// The request is checked before the router is contacted. Any failure
/// aborts the pass; records not yet reached keep their previous value.
pub async fn update_dns(
    router: &RouterConfig,
    request: &DnsUpdateRequest,
    publisher: &dyn DnsPublisher,
) -> Result<PublishReport, CoreError> {
    if request.is_empty() {
        return Err(CoreError::NoUpdates);
    }

    let ip = resolve_external_ip(router).await?;
    let report = publish(publisher, request, ip).await?;

    info!(
        provider = report.provider,
        %ip,
        domains = report.domains.len(),
        "dns update complete"
    );
    Ok(report)
}

//! Flag overrides on top of `vrd_config`, and translation to the core and
//! provider configs.
//!
//! Precedence is flag (or its env var) > `VRD_*__*` env > file > default.

use secrecy::SecretString;

use vrd_config::Config;
use vrd_core::{DnsUpdateRequest, RouterConfig};
use vrd_namecheap::NamecheapConfig;

use crate::cli::{GlobalOpts, NamecheapArgs};
use crate::error::CliError;

/// Load the config file and apply the global flags to it.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = vrd_config::load(global.config.as_deref())?;
    apply_global(&mut cfg, global);
    Ok(cfg)
}

fn apply_global(cfg: &mut Config, global: &GlobalOpts) {
    let router = &mut cfg.router;
    if let Some(ref host) = global.router {
        router.host.clone_from(host);
    }
    if let Some(ref name) = global.network_name {
        router.network_name.clone_from(name);
    }
    if let Some(ref ca) = global.ca_cert {
        router.ca_cert = Some(ca.clone());
    }
    if let Some(timeout) = global.timeout {
        router.timeout = timeout;
    }
    if global.insecure {
        router.insecure = true;
    }
}

/// Apply the `namecheap` subcommand flags.
pub fn apply_namecheap(cfg: &mut Config, args: &NamecheapArgs) {
    let nc = &mut cfg.namecheap;
    if let Some(ref user) = args.namecheap_api_user {
        nc.api_user = Some(user.clone());
    }
    if let Some(ref username) = args.namecheap_username {
        nc.username = Some(username.clone());
    }
    if let Some(ip) = args.client_ip {
        nc.client_ip = Some(ip);
    }
    if args.sandbox {
        nc.sandbox = true;
    }
}

pub fn router_config(cfg: &Config, global: &GlobalOpts) -> Result<RouterConfig, CliError> {
    let password = match global.router_password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => vrd_config::resolve_router_password(&cfg.router)?,
    };
    Ok(vrd_config::router_config(
        &cfg.router,
        password,
        global.trace_http,
    )?)
}

pub fn namecheap_config(cfg: &Config, args: &NamecheapArgs) -> Result<NamecheapConfig, CliError> {
    let api_key = match args.namecheap_api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => vrd_config::resolve_namecheap_api_key(&cfg.namecheap)?,
    };
    Ok(vrd_config::namecheap_config(&cfg.namecheap, api_key)?)
}

/// The hosts to update: every `--updates` payload in order, or the
/// config file's `[[updates]]` when none was given.
pub fn update_request(cfg: &Config, args: &NamecheapArgs) -> Result<DnsUpdateRequest, CliError> {
    if args.updates.is_empty() {
        return Ok(cfg.update_request());
    }

    let mut request = DnsUpdateRequest::new();
    for raw in &args.updates {
        let payload: vrd_config::UpdatesPayload = raw.parse()?;
        payload.extend_request(&mut request);
    }
    Ok(request)
}

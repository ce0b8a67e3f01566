//! Clap derive structures for the `vrd` CLI.
//!
//! Only depends on clap and std so `build.rs` can include it for man pages.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vrd -- dynamic DNS from a Verizon Fios router
#[derive(Debug, Parser)]
#[command(
    name = "vrd",
    version,
    about = "Update DNS providers with the external IP reported by a Verizon router",
    long_about = "Logs in to the local admin API of a Verizon Fios router, reads the\n\
        external IP address of the broadband network, and pushes it to DNS\n\
        provider host records.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router host or URL (overrides config)
    #[arg(long, short = 'r', env = "VRD_ROUTER", global = true)]
    pub router: Option<String>,

    /// Router admin password
    #[arg(long, env = "VRD_ROUTER_PASSWORD", global = true, hide_env_values = true)]
    pub router_password: Option<String>,

    /// Router network used as the source of the external IP address
    #[arg(long, env = "VRD_NETWORK_NAME", global = true)]
    pub network_name: Option<String>,

    /// Accept the router's certificate without verification
    #[arg(long, short = 'k', env = "VRD_INSECURE", global = true)]
    pub insecure: bool,

    /// CA certificate (PEM) to verify the router's certificate against
    #[arg(long, env = "VRD_CA_CERT", global = true, value_name = "PATH")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "VRD_TIMEOUT", global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "VRD_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VRD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, env = "VRD_LOG_FORMAT", default_value = "compact", global = true)]
    pub log_format: LogFormat,

    /// Trace every router HTTP exchange, headers and cookies included
    #[arg(long, global = true)]
    pub trace_http: bool,
}

// ── Output & Log Enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Bare values, one per line
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human readable
    Compact,
    /// Multi-line human readable
    Pretty,
    /// Newline-delimited JSON
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Update Namecheap host records with the router's external IP
    Namecheap(NamecheapArgs),

    /// Print the router's external IP address
    Ip,

    /// List the networks the router reports
    Networks,

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct NamecheapArgs {
    /// DNS records to update, as JSON:
    /// '{"domains":{"home":{"name":"example.com","hosts":["@","www"]}}}'
    /// (repeatable; defaults to [[updates]] in the config file)
    #[arg(long, value_name = "JSON")]
    pub updates: Vec<String>,

    /// Namecheap API key
    #[arg(long, env = "VRD_NAMECHEAP_API_KEY", hide_env_values = true)]
    pub namecheap_api_key: Option<String>,

    /// Namecheap API user
    #[arg(long, env = "VRD_NAMECHEAP_API_USER")]
    pub namecheap_api_user: Option<String>,

    /// Namecheap account owning the domains (defaults to the API user)
    #[arg(long, env = "VRD_NAMECHEAP_USERNAME")]
    pub namecheap_username: Option<String>,

    /// Whitelisted client IP sent to Namecheap (defaults to the router's IP)
    #[arg(long, value_name = "IPV4")]
    pub client_ip: Option<Ipv4Addr>,

    /// Use the Namecheap sandbox API
    #[arg(long)]
    pub sandbox: bool,

    /// Resolve the IP and log the updates without calling Namecheap
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?.redacted();
            let out = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => cfg.to_toml()?,
            };
            output::print_output(out.trim_end())
        }
        ConfigCommand::Path => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(vrd_config::config_path);
            output::print_output(&path.display().to_string())
        }
    }
}

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts, LogFormat};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    // Held for the whole run; events outside it go nowhere.
    let _log_guard = init_tracing(&cli.global);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Install the subscriber as the scoped default for this thread.
fn init_tracing(global: &GlobalOpts) -> DefaultGuard {
    let level = match global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if global.trace_http {
        if let Ok(directive) = "vrd_api=trace".parse() {
            filter = filter.add_directive(directive);
        }
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match global.log_format {
        LogFormat::Compact => tracing::subscriber::set_default(builder.compact().finish()),
        LogFormat::Pretty => tracing::subscriber::set_default(builder.pretty().finish()),
        LogFormat::Json => tracing::subscriber::set_default(builder.json().finish()),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "vrd", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs on a single-threaded runtime; each router
        // call depends on the state left by the previous one.
        cmd => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            tracing::debug!(command = ?cmd, "dispatching command");
            runtime.block_on(commands::dispatch(cmd, &cli.global))
        }
    }
}

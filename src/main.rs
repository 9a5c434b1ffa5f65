//! OneView Modules - idempotent appliance automation
//!
//! This is the main entry point for the CLI: it runs a single module
//! against an appliance and prints the `{changed, msg, ansible_facts}`
//! result, or lists the available modules.

use anyhow::Result;
use oneview_modules::cli::{render_result, Cli, Commands, OutputFormat};
use oneview_modules::modules::{ModuleContext, ModuleOutput, ModuleRegistry};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbosity());

    if cli.no_color {
        colored::control::set_override(false);
    }

    let registry = ModuleRegistry::with_builtins();

    let exit_code = match &cli.command {
        Commands::List => {
            let mut names = registry.names();
            names.sort_unstable();
            for name in names {
                println!("{}", name);
            }
            0
        }
        Commands::Run(args) => {
            let params = args.module_params()?;
            match registry.execute(&args.module, &params, &ModuleContext::default()) {
                Ok(output) => {
                    println!("{}", render_result(&args.module, &output, args.output)?);
                    0
                }
                Err(err) => {
                    // Failures surface as a fatal task result, same shape
                    // as a success.
                    let output = ModuleOutput::failed(err.to_string());
                    eprintln!("{}", render_result(&args.module, &output, args.output)?);
                    2
                }
            }
        }
    };

    std::process::exit(exit_code);
}

/// Initialize logging based on verbosity level
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(verbosity >= 3))
        .with(env_filter)
        .init();
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use yamllint::cli::{Cli, Commands};
use yamllint::config::{Config, CONFIG_FILE};
use yamllint::engine;
use yamllint::types::Level;

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("yamllint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yamllint=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Check {
            paths,
            format,
            config,
            fail_on,
            no_warnings,
        } => {
            let project_root = std::env::current_dir()?;
            let cfg = Config::load(config.as_deref(), &project_root)?;
            let mut result = engine::run(&paths, &cfg)?;
            if no_warnings {
                result.diagnostics.retain(|d| d.problem.level == Level::Error);
            }

            let output_format = format.unwrap_or(cfg.format);
            yamllint::cli::output::render(&result, &project_root, output_format);

            if result.has_level_at_least(fail_on) {
                std::process::exit(1);
            }
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(CONFIG_FILE);
            if path.exists() {
                eprintln!("{CONFIG_FILE} already exists");
                std::process::exit(1);
            }
            std::fs::write(&path, Config::default_toml())?;
            println!("Created {CONFIG_FILE}");
        }
        Commands::Explain { rule: None } => {
            println!("{}", yamllint::cli::explain::list_rules());
        }
        Commands::Explain { rule: Some(rule) } => {
            use yamllint::cli::explain::{explain, list_rules, suggest};
            match explain(&rule) {
                Some(text) => println!("{text}"),
                None => {
                    match suggest(&rule) {
                        Some(name) => eprintln!("Unknown rule: {rule}. Did you mean {name}?\n"),
                        None => eprintln!("Unknown rule: {rule}\n"),
                    }
                    eprintln!("{}", list_rules());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

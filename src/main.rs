//! Termfile CLI entry point.
//!
//! This binary provides the `termfile` command for opening terminal layouts
//! described in a TOML Termfile.

use clap::Parser;
use termfile::cli::Cli;
use termfile::driver::TerminalDriver;
use termfile::driver::recording::RecordingDriver;
use termfile::error::Result;
use termfile::executor::Executor;
use termfile::layout::Config;
use termfile::loader;
use termfile::registry::{DRY_RUN, DriverRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the fmt subscriber. `RUST_LOG` overrides the `-v` level.
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let registry = DriverRegistry::with_builtin();

    if cli.drivers {
        print_drivers(&registry);
        return Ok(());
    }

    if cli.list {
        for project in loader::list_projects()? {
            println!("{}", project);
        }
        return Ok(());
    }

    let path = loader::resolve_path(cli.file.as_deref(), cli.project.as_deref())?;
    let config = loader::load_termfile(&path)?;
    let entry = registry.select(cli.driver_name())?;
    info!(path = %path.display(), driver = entry.name, "running Termfile");

    if entry.name == DRY_RUN {
        let mut driver = RecordingDriver::new();
        execute(cli, &config, &mut driver)?;
        for action in driver.actions() {
            println!("{}", action);
        }
        return Ok(());
    }

    let mut driver = (entry.build)()?;
    execute(cli, &config, driver.as_mut())
}

/// Run either the setup commands or the layout.
fn execute(cli: &Cli, config: &Config, driver: &mut dyn TerminalDriver) -> Result<()> {
    let mut executor = Executor::new(driver);
    if cli.setup {
        executor.setup(config)?;
    } else {
        executor.run(config)?;
    }
    Ok(())
}

/// Print every registered driver and whether it can run here.
fn print_drivers(registry: &DriverRegistry) {
    println!("Drivers:");
    for entry in registry.entries() {
        let marker = if entry.is_available() { "*" } else { " " };
        println!("  {} {:<8} {}", marker, entry.name, entry.display_name);
    }
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mega_cli::cli::{Cli, Command};
use mega_cli::commands;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let Some(command) = cli.command else {
		commands::print_overview();
		return Ok(());
	};

	match command {
		Command::Init(args) => commands::init::run(args),
		Command::Dev(args) => commands::dev::run(args).await,
		Command::Setup { check } => commands::setup::run(check),
		Command::Compile(args) => commands::compile::run(&args),
		Command::Deploy(args) => commands::deploy::run(&args),
		Command::Verify(args) => commands::verify::run(&args),
		Command::Account { command } => commands::account::run(command),
		Command::Balance(args) => commands::balance::run(args).await,
		Command::Faucet(args) => commands::faucet::run(args).await,
	}
}

/// Logs go to stderr. `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

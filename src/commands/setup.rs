use anyhow::{Context, Result};
use yansi::Paint;

use crate::toolchain;

const INSTALL_DOCS: &str = "https://book.getfoundry.sh/getting-started/installation";

pub fn run(check: bool) -> Result<()> {
	println!("{}", "Checking dependencies...".blue());

	if toolchain::foundry_installed() {
		println!("{} Foundry is installed", "✓".green());
		return Ok(());
	}
	for tool in toolchain::FOUNDRY_TOOLS {
		if !toolchain::is_installed(tool) {
			tracing::info!(tool, "not found on PATH");
		}
	}
	println!("{} Foundry not detected", "✗".red());

	if check {
		println!("Run {} to install Foundry.", "mega setup".green());
		return Ok(());
	}

	if cfg!(windows) {
		print_windows_steps();
		return Ok(());
	}
	install_foundry()
}

fn print_windows_steps() {
	println!("{}", "\nWindows detected. Foundry installation requires manual steps:".yellow());
	println!("\n1. Install Rust from https://rustup.rs/");
	println!("\n2. Install Visual Studio from https://visualstudio.microsoft.com/downloads/");
	println!("\n3. Open a new terminal and run:");
	println!(
		"{}",
		"cargo install --git https://github.com/foundry-rs/foundry --profile release --locked forge cast chisel anvil"
			.cyan()
	);
	println!("\nFor more details, visit: {INSTALL_DOCS}");
	println!("\nRun {} after completing the installation to verify.", "mega setup --check".green());
}

fn install_foundry() -> Result<()> {
	println!("{}", "\nInstalling Foundry...".yellow());

	if let Err(e) = run_foundryup() {
		println!("\nPlease try manual installation: {INSTALL_DOCS}");
		return Err(e.context("error installing Foundry"));
	}

	println!("\n{} Foundry installed successfully!", "✓".green());
	println!("\nTo ensure the 'forge' command is available in your terminal, you may need to:");
	println!("1. Add this to your shell profile (.bashrc, .zshrc, etc.):");
	println!("{}", "   export PATH=\"$PATH:$HOME/.foundry/bin\"".cyan());
	println!("2. Restart your terminal or run:");
	println!("{}", "   source ~/.bashrc".cyan());
	println!("   (or the appropriate file for your shell)");
	Ok(())
}

/// Fetch `foundryup`, then run it from its install location.
fn run_foundryup() -> Result<()> {
	println!("Downloading foundryup script...");
	toolchain::run_shell("curl -L https://foundry.paradigm.xyz | bash")?;

	println!("\nRunning foundryup...");
	let foundryup = dirs::home_dir()
		.context("could not determine home directory")?
		.join(".foundry")
		.join("bin")
		.join("foundryup");
	toolchain::run(&foundryup.to_string_lossy(), &[])
}

use anyhow::{bail, Context, Result};
use yansi::Paint;

use crate::cli::AccountCommand;
use crate::toolchain;

pub fn run(command: AccountCommand) -> Result<()> {
	toolchain::ensure_installed("cast")?;
	match command {
		AccountCommand::Create { name } => create(name),
		AccountCommand::List => list(),
		AccountCommand::Import { name } => import(name),
	}
}

fn create(name: Option<String>) -> Result<()> {
	let name = wallet_name(name)?;
	println!("{}", format!("Creating new wallet: {name}").blue());

	let output = toolchain::capture("cast", &["wallet".into(), "new".into()])?;
	let key = extract_private_key(&output)
		.context("could not find a private key in the output of `cast wallet new`")?;

	println!("{}", "Importing wallet to keystore...".blue());
	println!("{}", "You will be asked for a password to encrypt the keystore.".dim());
	toolchain::run(
		"cast",
		&[
			"wallet".into(),
			"import".into(),
			name.clone(),
			"--private-key".into(),
			key.to_owned(),
		],
	)?;

	println!("{} Wallet `{name}` created and stored in the keystore.", "✓".green());
	println!("Use it with {}", format!("--account {name}").green());
	Ok(())
}

fn list() -> Result<()> {
	println!("{}", "Accounts in keystore:".blue());
	if toolchain::run("cast", &["wallet".into(), "list".into()]).is_err() {
		println!("{}", "No accounts found. Create one with:".yellow());
		println!("  {}", "mega account create <name>".green());
	}
	Ok(())
}

fn import(name: Option<String>) -> Result<()> {
	let name = wallet_name(name)?;
	println!("{}", format!("Importing wallet: {name}").blue());
	toolchain::run(
		"cast",
		&["wallet".into(), "import".into(), name.clone(), "--interactive".into()],
	)?;
	println!("{} Wallet `{name}` imported.", "✓".green());
	Ok(())
}

/// Use the given name, or ask for one.
fn wallet_name(name: Option<String>) -> Result<String> {
	if let Some(name) = name {
		validate_wallet_name(&name)?;
		return Ok(name);
	}
	let name: String = dialoguer::Input::new()
		.with_prompt("Wallet name")
		.validate_with(|input: &String| validate_wallet_name(input).map_err(|e| e.to_string()))
		.interact_text()?;
	Ok(name)
}

pub fn validate_wallet_name(name: &str) -> Result<()> {
	if name.trim().is_empty() {
		bail!("wallet name is required");
	}
	if name.chars().any(char::is_whitespace) {
		bail!("wallet name cannot contain spaces");
	}
	Ok(())
}

/// Pull the hex key out of `cast wallet new` output.
pub fn extract_private_key(output: &str) -> Option<&str> {
	output.lines().find_map(|line| {
		let key = line.trim().strip_prefix("Private key:")?.trim();
		let hex = key.strip_prefix("0x")?;
		(hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit())).then_some(key)
	})
}

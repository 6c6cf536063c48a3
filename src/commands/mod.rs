pub mod account;
pub mod balance;
pub mod compile;
pub mod deploy;
pub mod dev;
pub mod faucet;
pub mod init;
pub mod setup;
pub mod verify;

use yansi::Paint;

use crate::cli::ProjectArgs;
use crate::flags::{FlagArgs, FlagTable};

/// Shown when `mega` is run without a subcommand.
pub fn print_overview() {
	println!();
	println!("{}", format!("Mega Blockchain CLI v{}", env!("CARGO_PKG_VERSION")).blue());
	println!("A complete development environment for MegaETH");
	println!();
	println!("{}", "Available commands:".yellow());
	println!();
	for (name, about) in [
		("init", "Create a new Next.js/Foundry/full-stack project pre-configured for MegaETH"),
		("dev", "Start development environments"),
		("account", "Manage accounts and wallets"),
		("balance", "Check the balance of an address or account"),
		("faucet", "Request test tokens"),
		("compile", "Compile Solidity contracts"),
		("deploy", "Deploy contracts to Mega testnet"),
		("verify", "Verify contracts on block explorer"),
		("setup", "Check and install dependencies"),
	] {
		println!("  {} {about}", format!("{name:<14}").green());
	}
	println!();
	println!("Run {} for detailed usage information.", "mega --help".green());
}

/// Project layout flags, shared by `forge build` and `forge verify-contract`.
impl FlagTable for ProjectArgs {
	fn write_flags(&self, f: &mut FlagArgs) {
		f.switch("--build-info", self.build_info)
			.path("--build-info-path", self.build_info_path.as_deref())
			.path("--root", self.root.as_deref())
			.path("--contracts", self.contracts.as_deref())
			.joined_paths("--lib-paths", &self.lib_paths)
			.joined("--remappings", &self.remappings)
			.path("--cache-path", self.cache_path.as_deref())
			.path("--config-path", self.config_path.as_deref())
			.switch("--hardhat", self.hardhat);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn project_flags() {
		let project = ProjectArgs {
			root: Some(PathBuf::from("contracts")),
			remappings: vec!["@oz/=lib/oz/".into(), "ds-test/=lib/ds-test/".into()],
			hardhat: true,
			..Default::default()
		};
		assert_eq!(
			project.to_flags(),
			[
				"--root",
				"contracts",
				"--remappings",
				"@oz/=lib/oz/,ds-test/=lib/ds-test/",
				"--hardhat"
			]
		);
	}
}

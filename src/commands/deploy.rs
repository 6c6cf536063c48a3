use anyhow::Result;
use yansi::Paint;

use crate::cli::{DeployArgs, WalletArgs};
use crate::config::Config;
use crate::contracts::ANVIL_DEFAULT_KEY;
use crate::flags::{FlagArgs, FlagTable};
use crate::toolchain;

pub fn run(args: &DeployArgs) -> Result<()> {
	toolchain::ensure_installed("forge")?;
	let config = Config::load()?;
	let rpc_url = config.rpc_url(args.testnet);

	let network = if args.testnet { "Mega Testnet" } else { "Local Network" };
	println!("{} {network}", "Deploying to:".blue());
	println!("{} {rpc_url}", "RPC URL:".dim());
	println!("{} {}", "Contract:".blue(), args.contract);

	let uses_anvil_key = !args.testnet && args.wallet.is_empty();
	if uses_anvil_key {
		println!("{}", "Using the first account provided by Anvil".dim());
	}

	toolchain::run("forge", &create_command(args, rpc_url)).inspect_err(|_| {
		eprintln!("\n{}", "Deployment failed. See above for details.".red());
	})
}

/// Full `forge create` argument list. Local deployments without any wallet
/// option sign with Anvil's first account. Constructor args go last because
/// forge reads every following value into them.
pub fn create_command(args: &DeployArgs, rpc_url: &str) -> Vec<String> {
	let mut forge = FlagArgs::new();
	forge.arg("create").arg(&args.contract).value("--rpc-url", Some(rpc_url));
	args.write_flags(&mut forge);
	if !args.testnet && args.wallet.is_empty() {
		forge.value("--private-key", Some(ANVIL_DEFAULT_KEY));
	}
	forge
		.extend(&args.passthrough)
		.many("--constructor-args", &args.constructor_args);
	forge.into_vec()
}

impl FlagTable for DeployArgs {
	fn write_flags(&self, f: &mut FlagArgs) {
		f.switch("--broadcast", self.broadcast)
			.path("--constructor-args-path", self.constructor_args_path.as_deref())
			.switch("--verify", self.verify)
			.value("--verifier", self.verifier.as_ref())
			.value("--verifier-url", self.verifier_url.as_ref())
			.switch("--unlocked", self.unlocked)
			.value("--gas-limit", self.gas_limit.as_ref())
			.value("--gas-price", self.gas_price.as_ref())
			.value("--priority-gas-price", self.priority_gas_price.as_ref())
			.value("--value", self.value.as_ref())
			.value("--nonce", self.nonce)
			.switch("--legacy", self.legacy);
		self.wallet.write_flags(f);
		f.switch("--optimize", self.optimize)
			.value("--optimizer-runs", self.optimizer_runs)
			.joined("--libraries", &self.libraries)
			.switch("--json", self.json);
	}
}

impl FlagTable for WalletArgs {
	fn write_flags(&self, f: &mut FlagArgs) {
		f.value("--interactive", self.interactive)
			.value("--private-key", self.private_key.as_ref())
			.many("--private-keys", &self.private_keys)
			.path("--keystore", self.keystore.as_deref())
			.value("--account", self.account.as_ref())
			.value("--password", self.password.as_ref())
			.value("--from", self.from);
	}
}

use anyhow::Result;
use yansi::Paint;

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::flags::{FlagArgs, FlagTable};
use crate::toolchain;

pub fn run(args: &VerifyArgs) -> Result<()> {
	toolchain::ensure_installed("forge")?;
	let config = Config::load()?;

	println!("{}", "Verifying contract on Mega testnet...".blue());
	println!("{} {}", "Contract address:".dim(), args.address);
	println!("{} {}", "Contract:".dim(), args.contract);

	let command = verify_command(args, config.network.explorer_chain_id);
	toolchain::run("forge", &command).inspect_err(|_| {
		eprintln!("\n{}", "Verification failed. See above for details.".red());
	})?;
	println!("{} Verification process completed!", "✓".green());
	Ok(())
}

pub fn verify_command(args: &VerifyArgs, chain_id: u64) -> Vec<String> {
	let mut forge = FlagArgs::new();
	forge
		.arg("verify-contract")
		.arg(args.address)
		.arg(&args.contract)
		.value("--chain", Some(chain_id));
	args.write_flags(&mut forge);
	forge.into_vec()
}

impl FlagTable for VerifyArgs {
	fn write_flags(&self, f: &mut FlagArgs) {
		f.value("--verifier", Some(&self.verifier))
			.value("--verifier-url", self.verifier_url.as_ref())
			.switch("--skip-is-verified-check", self.skip_is_verified_check)
			.value("--compiler-version", self.compiler_version.as_ref())
			.value("--num-of-optimizations", self.num_of_optimizations)
			.value("--optimizer-runs", self.optimizer_runs)
			.value("--constructor-args", self.constructor_args.as_ref())
			.path("--constructor-args-path", self.constructor_args_path.as_deref())
			.switch("--flatten", self.flatten)
			.switch("--force", self.force)
			.value("--delay", self.delay)
			.value("--retries", self.retries)
			.switch("--show-standard-json-input", self.show_standard_json_input)
			.switch("--watch", self.watch)
			.switch("--via-ir", self.via_ir)
			.value("--etherscan-api-key", self.etherscan_api_key.as_ref());
		self.project.write_flags(f);
		f.extend(&self.passthrough);
	}
}

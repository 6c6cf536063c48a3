use alloy::primitives::Address;
use anyhow::{bail, Result};
use yansi::Paint;

use crate::chain::{FaucetChain, RpcChain};
use crate::cli::BalanceArgs;
use crate::config::Config;
use crate::identity::{self, Identity, Keystore};
use crate::units::{format_balance, BalanceUnit};

pub async fn run(args: BalanceArgs) -> Result<()> {
	let address = target_address(&args, Keystore::foundry_default)?;
	let config = Config::load()?;
	let chain = RpcChain::new(&config.network.testnet_rpc)?;

	println!("{} {address}", "Checking balance for".blue());
	let wei = chain.balance(address).await?;

	let unit = if args.ether { BalanceUnit::Ether } else { BalanceUnit::Wei };
	println!(
		"{} {} {}",
		"Balance:".green(),
		format_balance(wei, unit),
		unit.symbol()
	);
	Ok(())
}

/// `--account` wins over a positional address.
fn target_address(
	args: &BalanceArgs,
	keystore: impl FnOnce() -> Result<Keystore>,
) -> Result<Address> {
	match (&args.account, args.address) {
		(Some(name), address) => {
			if address.is_some() {
				println!(
					"{}",
					"Both an address and --account were given; using the account.".yellow()
				);
			}
			let identity = Identity::Keystore { name: name.clone() };
			let resolved = identity::resolve(&identity, &keystore()?)?;
			println!("{} {}", "Using account:".dim(), name);
			Ok(resolved.address)
		}
		(None, Some(address)) => Ok(address),
		(None, None) => bail!("provide an address or use --account <name>"),
	}
}

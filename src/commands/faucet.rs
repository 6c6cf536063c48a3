use anyhow::Result;

use crate::chain::RpcChain;
use crate::cli::FaucetArgs;
use crate::config::Config;
use crate::faucet::FaucetFlow;
use crate::identity::{Identity, Keystore};
use crate::units::BalanceUnit;

pub async fn run(args: FaucetArgs) -> Result<()> {
	let identity = Identity::from_flags(args.account, args.private_key);
	let config = Config::load()?;
	let chain = RpcChain::new(&config.network.testnet_rpc)?;
	let keystore = Keystore::foundry_default()?;

	let flow = FaucetFlow {
		chain: &chain,
		keystore: &keystore,
		policy: (&config.faucet).into(),
		unit: if args.wei { BalanceUnit::Wei } else { BalanceUnit::Ether },
	};
	let outcome = flow.claim(identity.as_ref()).await?;
	tracing::debug!(?outcome, "faucet run finished");
	Ok(())
}

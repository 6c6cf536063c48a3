//! Integration tests that hit the MegaETH testnet RPC.
//!
//! These are marked `#[ignore]` by default because they require network
//! access. Run them explicitly with:
//!
//!   cargo test --test integration -- --ignored

use alloy::primitives::{address, Address};
use mega_cli::chain::{Eligibility, FaucetChain, RpcChain};
use mega_cli::config::Config;

/// An address that has never claimed, so the simulation reflects the faucet state.
const FRESH: Address = address!("0x000000000000000000000000000000000000dEaD");

fn testnet() -> RpcChain {
	RpcChain::new(&Config::default().network.testnet_rpc).expect("valid testnet url")
}

#[tokio::test]
#[ignore]
async fn faucet_contract_is_reachable() {
	let chain = testnet();
	// Either answer is fine; a transport failure is not.
	let eligibility = chain.simulate_claim(FRESH).await.expect("simulation failed");
	match eligibility {
		Eligibility::Eligible => {}
		Eligibility::Ineligible(reason) => println!("faucet refused fresh address: {reason}"),
	}
}

#[tokio::test]
#[ignore]
async fn balance_query_succeeds() {
	let chain = testnet();
	chain.balance(FRESH).await.expect("balance query failed");
}

#[tokio::test]
#[ignore]
async fn unreachable_endpoint_fails_eligibility_check() {
	let chain = RpcChain::new("http://127.0.0.1:1").unwrap();
	let err = chain.simulate_claim(FRESH).await.unwrap_err();
	assert!(
		err.to_string().starts_with("eligibility check failed"),
		"unexpected error: {err}"
	);
}

//! The faucet claim pipeline.
//!
//! identity -> address -> simulated claim -> broadcast -> bounded
//! confirmation -> balance. Each step gates the next, and at most one
//! transaction is broadcast per run.

use alloy::primitives::{Address, TxHash};
use yansi::Paint;

use crate::chain::{Confirmation, ConfirmPolicy, Eligibility, FaucetChain};
use crate::contracts::FAUCET;
use crate::error::FaucetError;
use crate::identity::{self, Identity, Keystore};
use crate::units::{format_balance, BalanceUnit};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
	/// No identity was given; usage help was printed instead.
	Usage,
	Claimed(ClaimReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReport {
	pub address: Address,
	pub tx_hash: TxHash,
	pub confirmation: Confirmation,
	/// Formatted balance after confirmation, if it could be read.
	pub balance: Option<String>,
}

pub struct FaucetFlow<'a, C: FaucetChain + ?Sized> {
	pub chain: &'a C,
	pub keystore: &'a Keystore,
	pub policy: ConfirmPolicy,
	pub unit: BalanceUnit,
}

impl<C: FaucetChain + ?Sized> FaucetFlow<'_, C> {
	pub async fn claim(&self, identity: Option<&Identity>) -> Result<ClaimOutcome, FaucetError> {
		let Some(identity) = identity else {
			print_usage();
			return Ok(ClaimOutcome::Usage);
		};

		let resolved = identity::resolve(identity, self.keystore)?;
		let address = resolved.address;
		println!("{} {address}", "Account address:".green());

		println!("{}", "Checking if address is eligible for faucet...".blue());
		match self.chain.simulate_claim(address).await? {
			Eligibility::Eligible => println!("{}", "Address is eligible for faucet claim!".green()),
			Eligibility::Ineligible(reason) => {
				tracing::info!(%address, ?reason, "claim simulation reverted");
				return Err(FaucetError::Ineligible(reason));
			}
		}

		println!("{}", format!("Claiming {} from faucet...", FAUCET.drip).blue());
		let tx_hash = self.chain.submit_claim(&resolved.signer).await?;
		println!("{}", "Faucet claim submitted!".green());
		println!("{} {tx_hash}", "Transaction hash:".cyan());

		println!("{}", "Waiting for transaction to be mined...".blue());
		let confirmation = self.chain.confirm(tx_hash, self.policy).await?;
		let balance = match &confirmation {
			Confirmation::Confirmed { block } => {
				match block {
					Some(block) => println!("{} {block}", "Confirmed in block".green()),
					None => println!("{}", "Confirmed.".green()),
				}
				self.read_balance(address).await
			}
			Confirmation::Unknown => {
				println!(
					"{}",
					"Transaction not mined yet. It may still land; check it later with its hash."
						.yellow()
				);
				None
			}
		};

		Ok(ClaimOutcome::Claimed(ClaimReport {
			address,
			tx_hash,
			confirmation,
			balance,
		}))
	}

	/// Best effort: a failed read is reported, not propagated.
	async fn read_balance(&self, address: Address) -> Option<String> {
		match self.chain.balance(address).await {
			Ok(wei) => {
				let formatted = format_balance(wei, self.unit);
				println!("{}", format!("New balance: {formatted} {}", self.unit.symbol()).green());
				Some(formatted)
			}
			Err(e) => {
				tracing::debug!(%address, error = %e, "balance read failed");
				println!("{}", "Unable to retrieve updated balance.".yellow());
				None
			}
		}
	}
}

fn print_usage() {
	println!("{}", "MegaETH Testnet Faucet".blue());
	println!("\nYou need to provide authentication to claim from the faucet:");
	println!("  {}       Use a saved account", "mega faucet --account <name>".green());
	println!("  {}", "or".yellow());
	println!("  {}    Use a private key directly", "mega faucet --private-key <key>".green());
	println!("\nExample:");
	println!("  {}", "mega faucet --account dev".dim());
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::time::Duration;

	use alloy::primitives::{b256, U256};
	use alloy::signers::local::PrivateKeySigner;

	use super::*;
	use crate::error::IneligibleReason;
	use crate::identity::tests::{FixedPassword, ADDRESS, KEY};

	const TX: TxHash = b256!("0xdef0000000000000000000000000000000000000000000000000000000000001");

	struct MockChain {
		eligibility: Result<Eligibility, FaucetError>,
		submission: Result<TxHash, FaucetError>,
		confirmation: Result<Confirmation, FaucetError>,
		balance: Option<U256>,
		simulations: AtomicUsize,
		submissions: AtomicUsize,
		confirmations: AtomicUsize,
		balance_reads: AtomicUsize,
	}

	impl MockChain {
		fn happy() -> Self {
			Self {
				eligibility: Ok(Eligibility::Eligible),
				submission: Ok(TX),
				confirmation: Ok(Confirmation::Confirmed { block: Some(42) }),
				balance: Some(U256::from(10_000_000_000_000u64)),
				simulations: AtomicUsize::new(0),
				submissions: AtomicUsize::new(0),
				confirmations: AtomicUsize::new(0),
				balance_reads: AtomicUsize::new(0),
			}
		}

		fn ineligible(reason: IneligibleReason) -> Self {
			Self {
				eligibility: Ok(Eligibility::Ineligible(reason)),
				..Self::happy()
			}
		}

		fn network_calls(&self) -> usize {
			self.simulations.load(Ordering::SeqCst)
				+ self.submissions.load(Ordering::SeqCst)
				+ self.confirmations.load(Ordering::SeqCst)
				+ self.balance_reads.load(Ordering::SeqCst)
		}
	}

	#[async_trait::async_trait]
	impl FaucetChain for MockChain {
		async fn simulate_claim(&self, from: Address) -> Result<Eligibility, FaucetError> {
			assert_eq!(from, ADDRESS);
			self.simulations.fetch_add(1, Ordering::SeqCst);
			self.eligibility.clone()
		}

		async fn submit_claim(&self, signer: &PrivateKeySigner) -> Result<TxHash, FaucetError> {
			assert_eq!(signer.address(), ADDRESS);
			self.submissions.fetch_add(1, Ordering::SeqCst);
			self.submission.clone()
		}

		async fn confirm(
			&self,
			tx_hash: TxHash,
			_policy: ConfirmPolicy,
		) -> Result<Confirmation, FaucetError> {
			assert_eq!(tx_hash, TX);
			self.confirmations.fetch_add(1, Ordering::SeqCst);
			self.confirmation.clone()
		}

		async fn balance(&self, _address: Address) -> anyhow::Result<U256> {
			self.balance_reads.fetch_add(1, Ordering::SeqCst);
			self.balance.ok_or_else(|| anyhow::anyhow!("balance unavailable"))
		}
	}

	fn keystore() -> Keystore {
		Keystore::new("/nonexistent/keystores", Box::new(FixedPassword("hunter2")))
	}

	async fn run(chain: &MockChain, identity: Option<Identity>) -> Result<ClaimOutcome, FaucetError> {
		let keystore = keystore();
		let flow = FaucetFlow {
			chain,
			keystore: &keystore,
			policy: ConfirmPolicy {
				attempts: 3,
				interval: Duration::from_millis(1),
			},
			unit: BalanceUnit::Ether,
		};
		flow.claim(identity.as_ref()).await
	}

	fn raw_key() -> Option<Identity> {
		Some(Identity::PrivateKey(KEY.into()))
	}

	#[tokio::test]
	async fn eligible_claim_is_submitted_once_and_reported() {
		let chain = MockChain::happy();
		let outcome = run(&chain, raw_key()).await.unwrap();

		assert_eq!(
			outcome,
			ClaimOutcome::Claimed(ClaimReport {
				address: ADDRESS,
				tx_hash: TX,
				confirmation: Confirmation::Confirmed { block: Some(42) },
				balance: Some("0.00001".into()),
			})
		);
		assert_eq!(chain.simulations.load(Ordering::SeqCst), 1);
		assert_eq!(chain.submissions.load(Ordering::SeqCst), 1);
		assert_eq!(chain.confirmations.load(Ordering::SeqCst), 1);
		assert_eq!(chain.balance_reads.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn no_identity_prints_usage_without_network() {
		let chain = MockChain::happy();
		let outcome = run(&chain, None).await.unwrap();
		assert_eq!(outcome, ClaimOutcome::Usage);
		assert_eq!(chain.network_calls(), 0);
	}

	#[tokio::test]
	async fn malformed_key_stops_before_network() {
		let chain = MockChain::happy();
		let err = run(&chain, Some(Identity::PrivateKey("0xabc".into())))
			.await
			.unwrap_err();
		assert!(matches!(err, FaucetError::IdentityResolution(_)));
		assert_eq!(chain.network_calls(), 0);
	}

	#[tokio::test]
	async fn unknown_keystore_stops_before_network() {
		let chain = MockChain::happy();
		let err = run(&chain, Some(Identity::Keystore { name: "dev".into() }))
			.await
			.unwrap_err();
		assert!(matches!(err, FaucetError::IdentityResolution(_)));
		assert_eq!(chain.network_calls(), 0);
	}

	#[tokio::test]
	async fn ineligible_claims_are_never_submitted() {
		for reason in [
			IneligibleReason::AlreadyClaimedRecently,
			IneligibleReason::FaucetEmpty,
			IneligibleReason::CallerNotOwner,
			IneligibleReason::Unknown("0xdeadbeef".into()),
		] {
			let chain = MockChain::ineligible(reason.clone());
			let err = run(&chain, raw_key()).await.unwrap_err();
			match err {
				FaucetError::Ineligible(got) => assert_eq!(got, reason),
				other => panic!("unexpected error: {other}"),
			}
			assert_eq!(chain.simulations.load(Ordering::SeqCst), 1);
			assert_eq!(chain.submissions.load(Ordering::SeqCst), 0);
		}
	}

	#[tokio::test]
	async fn failed_eligibility_check_aborts() {
		let chain = MockChain {
			eligibility: Err(FaucetError::EligibilityCheck("connection refused".into())),
			..MockChain::happy()
		};
		let err = run(&chain, raw_key()).await.unwrap_err();
		assert!(matches!(err, FaucetError::EligibilityCheck(_)));
		assert_eq!(chain.submissions.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn rejected_submission_is_not_retried() {
		let chain = MockChain {
			submission: Err(FaucetError::Submission("replacement transaction underpriced".into())),
			..MockChain::happy()
		};
		let err = run(&chain, raw_key()).await.unwrap_err();
		assert!(err.to_string().contains("underpriced"));
		assert_eq!(chain.submissions.load(Ordering::SeqCst), 1);
		assert_eq!(chain.confirmations.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn unconfirmed_claim_is_not_a_failure() {
		let chain = MockChain {
			confirmation: Ok(Confirmation::Unknown),
			..MockChain::happy()
		};
		let ClaimOutcome::Claimed(report) = run(&chain, raw_key()).await.unwrap() else {
			panic!("expected a claim report");
		};
		assert_eq!(report.tx_hash, TX);
		assert_eq!(report.confirmation, Confirmation::Unknown);
		assert_eq!(report.balance, None);
		assert_eq!(chain.balance_reads.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn reverted_claim_is_reported_distinctly() {
		let chain = MockChain {
			confirmation: Err(FaucetError::Reverted(TX)),
			..MockChain::happy()
		};
		let err = run(&chain, raw_key()).await.unwrap_err();
		assert!(matches!(err, FaucetError::Reverted(hash) if hash == TX));
		assert_eq!(chain.balance_reads.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn balance_read_failure_degrades_to_a_note() {
		let chain = MockChain {
			balance: None,
			..MockChain::happy()
		};
		let ClaimOutcome::Claimed(report) = run(&chain, raw_key()).await.unwrap() else {
			panic!("expected a claim report");
		};
		assert!(matches!(report.confirmation, Confirmation::Confirmed { .. }));
		assert_eq!(report.balance, None);
	}
}

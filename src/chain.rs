use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use anyhow::Result;

use crate::contracts::FAUCET;
use crate::error::{FaucetError, IneligibleReason};
use crate::revert;

/// Outcome of a simulated claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
	Eligible,
	Ineligible(IneligibleReason),
}

/// Whether a submitted transaction was seen mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
	Confirmed { block: Option<u64> },
	/// Not mined within the polling bound; it may still land later.
	Unknown,
}

/// Bounded receipt polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
	pub attempts: u32,
	pub interval: Duration,
}

impl From<&crate::config::FaucetConfig> for ConfirmPolicy {
	fn from(config: &crate::config::FaucetConfig) -> Self {
		Self {
			attempts: config.confirmation_attempts,
			interval: config.interval(),
		}
	}
}

/// The on-chain operations the faucet flow needs.
#[async_trait::async_trait]
pub trait FaucetChain: Send + Sync {
	/// `eth_call` the claim from `from` without broadcasting.
	async fn simulate_claim(&self, from: Address) -> Result<Eligibility, FaucetError>;

	/// Sign and broadcast a claim. Returns as soon as the node accepts it.
	async fn submit_claim(&self, signer: &PrivateKeySigner) -> Result<TxHash, FaucetError>;

	/// Wait for `tx_hash` to be mined, within `policy`.
	async fn confirm(
		&self,
		tx_hash: TxHash,
		policy: ConfirmPolicy,
	) -> Result<Confirmation, FaucetError>;

	async fn balance(&self, address: Address) -> Result<U256>;
}

/// [`FaucetChain`] over a JSON-RPC HTTP endpoint.
pub struct RpcChain {
	url: Url,
	provider: DynProvider,
}

impl RpcChain {
	pub fn new(url: &str) -> Result<Self> {
		let url: Url = url
			.parse()
			.map_err(|e| anyhow::anyhow!("invalid RPC URL `{url}`: {e}"))?;
		let provider = ProviderBuilder::new().connect_http(url.clone()).erased();
		Ok(Self { url, provider })
	}

	fn claim_request(&self) -> TransactionRequest {
		TransactionRequest::default()
			.with_to(FAUCET.address)
			.with_input(FAUCET.claim_calldata())
	}
}

#[async_trait::async_trait]
impl FaucetChain for RpcChain {
	async fn simulate_claim(&self, from: Address) -> Result<Eligibility, FaucetError> {
		let tx = self.claim_request().with_from(from);
		match self.provider.call(tx).await {
			Ok(_) => Ok(Eligibility::Eligible),
			Err(err) => match revert::classify_call_error(&err) {
				Some(reason) => Ok(Eligibility::Ineligible(reason)),
				None => Err(FaucetError::EligibilityCheck(err.to_string())),
			},
		}
	}

	async fn submit_claim(&self, signer: &PrivateKeySigner) -> Result<TxHash, FaucetError> {
		let wallet = EthereumWallet::from(signer.clone());
		let provider = ProviderBuilder::new()
			.wallet(wallet)
			.connect_http(self.url.clone());
		let tx = self
			.claim_request()
			.with_from(signer.address())
			.with_gas_limit(FAUCET.gas_limit);

		let pending = provider
			.send_transaction(tx)
			.await
			.map_err(|e| FaucetError::Submission(e.to_string()))?;
		Ok(*pending.tx_hash())
	}

	async fn confirm(
		&self,
		tx_hash: TxHash,
		policy: ConfirmPolicy,
	) -> Result<Confirmation, FaucetError> {
		for attempt in 1..=policy.attempts {
			match self.provider.get_transaction_receipt(tx_hash).await {
				Ok(Some(receipt)) => {
					if !ReceiptResponse::status(&receipt) {
						return Err(FaucetError::Reverted(tx_hash));
					}
					return Ok(Confirmation::Confirmed {
						block: ReceiptResponse::block_number(&receipt),
					});
				}
				Ok(None) => tracing::debug!(%tx_hash, attempt, "receipt not available yet"),
				Err(e) => tracing::warn!(%tx_hash, attempt, error = %e, "receipt lookup failed"),
			}
			if attempt < policy.attempts {
				tokio::time::sleep(policy.interval).await;
			}
		}
		Ok(Confirmation::Unknown)
	}

	async fn balance(&self, address: Address) -> Result<U256> {
		Ok(self.provider.get_balance(address).await?)
	}
}

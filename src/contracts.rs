use alloy::primitives::{address, Address, Bytes};
use alloy::sol;

/// The MegaETH testnet faucet.
pub struct FaucetContract {
	pub address: Address,
	/// Selector of the parameterless claim entry point.
	pub claim_selector: [u8; 4],
	/// Gas ceiling for a claim; the call costs a little under this.
	pub gas_limit: u64,
	/// Amount dispensed per claim, as shown to the user.
	pub drip: &'static str,
}

impl FaucetContract {
	/// Calldata for a claim: the bare selector.
	pub fn claim_calldata(&self) -> Bytes {
		Bytes::copy_from_slice(&self.claim_selector)
	}
}

pub static FAUCET: FaucetContract = FaucetContract {
	address: address!("0x22988D807e4487B38e7632F3bb21f2383C3CC6B2"),
	claim_selector: [0x61, 0xed, 0x46, 0x48],
	gas_limit: 94_960,
	drip: "0.00001 ETH",
};

/// First prefunded Anvil account, used for local deployments when no wallet
/// is given.
pub const ANVIL_DEFAULT_KEY: &str =
	"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

sol! {
	/// Errors the faucet (or its access control) may revert with.
	interface IFaucet {
		error AlreadyClaimedRecently();
		error FaucetEmpty();
		error CallerNotOwner();
		error OwnableUnauthorizedAccount(address account);
	}
}

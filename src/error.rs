use std::fmt;

/// Why the faucet refused a simulated claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
	AlreadyClaimedRecently,
	FaucetEmpty,
	CallerNotOwner,
	/// Unmapped revert; carries the raw reason or revert data.
	Unknown(String),
}

impl fmt::Display for IneligibleReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AlreadyClaimedRecently => {
				f.write_str("already claimed from the faucet recently, wait 24 hours between claims")
			}
			Self::FaucetEmpty => f.write_str("the faucet is out of funds"),
			Self::CallerNotOwner => f.write_str("the faucet only accepts calls from its owner"),
			Self::Unknown(raw) => write!(f, "faucet reverted: {raw}"),
		}
	}
}

/// Failures of the faucet claim flow, each surfaced to the user as-is.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FaucetError {
	#[error("could not resolve identity: {0}")]
	IdentityResolution(String),

	#[error("eligibility check failed: {0}")]
	EligibilityCheck(String),

	#[error("not eligible: {0}")]
	Ineligible(IneligibleReason),

	#[error("failed to send claim transaction: {0}")]
	Submission(String),

	#[error("claim transaction {0} was mined but reverted")]
	Reverted(alloy::primitives::TxHash),
}

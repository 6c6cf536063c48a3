//! Decoding of faucet reverts into [`IneligibleReason`]s.
//!
//! Revert data is first decoded into an error name: the name of a custom error
//! declared on `IFaucet`, or the reason string of an `Error(string)` revert.
//! That name is then looked up in a fixed table. Nothing is matched by
//! substring.

use alloy::sol_types::{Revert, SolError, SolInterface};
use alloy::transports::TransportError;

use crate::contracts::IFaucet::IFaucetErrors;
use crate::error::IneligibleReason;

static KNOWN_REVERTS: &[(&str, IneligibleReason)] = &[
	("AlreadyClaimedRecently", IneligibleReason::AlreadyClaimedRecently),
	("FaucetEmpty", IneligibleReason::FaucetEmpty),
	("CallerNotOwner", IneligibleReason::CallerNotOwner),
	("OwnableUnauthorizedAccount", IneligibleReason::CallerNotOwner),
	("Not allowed to withdraw yet", IneligibleReason::AlreadyClaimedRecently),
	("Ownable: caller is not the owner", IneligibleReason::CallerNotOwner),
];

/// Map a decoded error name or reason string to a known cause.
pub fn lookup(name: &str) -> Option<IneligibleReason> {
	KNOWN_REVERTS
		.iter()
		.find(|(known, _)| *known == name)
		.map(|(_, reason)| reason.clone())
}

/// Decode raw revert data returned by a failed `eth_call`.
pub fn decode_revert_data(data: &[u8]) -> IneligibleReason {
	match error_name(data) {
		Some(name) => lookup(&name).unwrap_or(IneligibleReason::Unknown(name)),
		None if data.is_empty() => IneligibleReason::Unknown("reverted without data".into()),
		None => IneligibleReason::Unknown(format!("0x{}", hex::encode(data))),
	}
}

/// Classify an `eth_call` failure.
///
/// Returns `Some` when the node reported an execution revert, `None` for any
/// other failure (transport, malformed response, non-revert RPC error).
pub fn classify_call_error(err: &TransportError) -> Option<IneligibleReason> {
	let payload = err.as_error_resp()?;
	if let Some(data) = payload.as_revert_data() {
		return Some(decode_revert_data(&data));
	}

	// Some nodes only put the reason in the message: "execution reverted: <reason>".
	let message: &str = payload.message.as_ref();
	let rest = message.strip_prefix("execution reverted")?;
	let reason = rest.trim_start_matches(':').trim();
	if reason.is_empty() {
		return Some(IneligibleReason::Unknown(message.to_owned()));
	}
	Some(lookup(reason).unwrap_or_else(|| IneligibleReason::Unknown(reason.to_owned())))
}

fn error_name(data: &[u8]) -> Option<String> {
	if let Ok(err) = IFaucetErrors::abi_decode(data) {
		let name = match err {
			IFaucetErrors::AlreadyClaimedRecently(_) => "AlreadyClaimedRecently",
			IFaucetErrors::FaucetEmpty(_) => "FaucetEmpty",
			IFaucetErrors::CallerNotOwner(_) => "CallerNotOwner",
			IFaucetErrors::OwnableUnauthorizedAccount(_) => "OwnableUnauthorizedAccount",
		};
		return Some(name.to_owned());
	}
	Revert::abi_decode(data).ok().map(|revert| revert.reason)
}

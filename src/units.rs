use alloy::primitives::utils::format_units;
use alloy::primitives::U256;

/// Unit a balance is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceUnit {
	Wei,
	Ether,
}

impl BalanceUnit {
	pub fn symbol(self) -> &'static str {
		match self {
			Self::Wei => "wei",
			Self::Ether => "ETH",
		}
	}
}

/// Format `wei` in the requested unit. Ether amounts drop trailing
/// fractional zeros.
pub fn format_balance(wei: U256, unit: BalanceUnit) -> String {
	match unit {
		BalanceUnit::Wei => wei.to_string(),
		BalanceUnit::Ether => {
			let formatted = format_units(wei, "ether").unwrap_or_else(|_| wei.to_string());
			trim_fraction(formatted)
		}
	}
}

fn trim_fraction(mut value: String) -> String {
	if value.contains('.') {
		let trimmed = value.trim_end_matches('0').trim_end_matches('.').len();
		value.truncate(trimmed);
	}
	value
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wei_is_printed_verbatim() {
		assert_eq!(format_balance(U256::from(12345u64), BalanceUnit::Wei), "12345");
	}

	#[test]
	fn ether_trims_zeros() {
		let one_eth = U256::from(1_000_000_000_000_000_000u128);
		assert_eq!(format_balance(one_eth, BalanceUnit::Ether), "1");
		assert_eq!(format_balance(U256::from(10_000_000_000_000u64), BalanceUnit::Ether), "0.00001");
		assert_eq!(format_balance(U256::ZERO, BalanceUnit::Ether), "0");
	}

	#[test]
	fn ether_keeps_significant_digits() {
		let wei = U256::from(1_500_000_000_000_000_001u128);
		assert_eq!(format_balance(wei, BalanceUnit::Ether), "1.500000000000000001");
	}

	#[test]
	fn symbols() {
		assert_eq!(BalanceUnit::Wei.symbol(), "wei");
		assert_eq!(BalanceUnit::Ether.symbol(), "ETH");
	}
}

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub network: NetworkConfig,
	pub faucet: FaucetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
	pub testnet_rpc: String,
	pub local_rpc: String,
	/// Chain passed to `forge verify-contract`.
	pub explorer_chain_id: u64,
}

/// How long the faucet waits for its claim transaction to be mined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaucetConfig {
	pub confirmation_attempts: u32,
	pub confirmation_interval_ms: u64,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			network: NetworkConfig {
				testnet_rpc: "https://carrot.megaeth.com/rpc".into(),
				local_rpc: "http://localhost:8545".into(),
				explorer_chain_id: 11155111,
			},
			faucet: FaucetConfig {
				confirmation_attempts: 10,
				confirmation_interval_ms: 1500,
			},
		}
	}
}

impl FaucetConfig {
	pub fn interval(&self) -> Duration {
		Duration::from_millis(self.confirmation_interval_ms)
	}
}

impl Config {
	/// Directory where CLI state is stored (~/.mega/).
	pub fn dir() -> anyhow::Result<PathBuf> {
		dirs::home_dir()
			.map(|home| home.join(".mega"))
			.ok_or_else(|| anyhow::anyhow!("could not determine home directory"))
	}

	/// Path to the config file.
	pub fn path() -> anyhow::Result<PathBuf> {
		Ok(Self::dir()?.join("config.toml"))
	}

	/// Load config from disk, falling back to defaults if no file exists.
	pub fn load() -> anyhow::Result<Self> {
		let path = Self::path()?;
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			let config = toml::from_str(&content)?;
			tracing::debug!(path = %path.display(), "loaded config");
			Ok(config)
		} else {
			Ok(Self::default())
		}
	}

	/// RPC endpoint for either the public testnet or a local Anvil node.
	pub fn rpc_url(&self, testnet: bool) -> &str {
		if testnet {
			&self.network.testnet_rpc
		} else {
			&self.network.local_rpc
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_sensible() {
		let c = Config::default();
		assert_eq!(c.network.testnet_rpc, "https://carrot.megaeth.com/rpc");
		assert_eq!(c.network.local_rpc, "http://localhost:8545");
		assert_eq!(c.network.explorer_chain_id, 11155111);
		assert_eq!(c.faucet.confirmation_attempts, 10);
		assert_eq!(c.faucet.interval(), Duration::from_millis(1500));
	}

	#[test]
	fn toml_roundtrip() {
		let mut c = Config::default();
		c.faucet.confirmation_attempts = 3;
		c.network.local_rpc = "http://127.0.0.1:9545".into();

		let serialized = toml::to_string_pretty(&c).unwrap();
		let parsed: Config = toml::from_str(&serialized).unwrap();

		assert_eq!(parsed.faucet.confirmation_attempts, 3);
		assert_eq!(parsed.network.local_rpc, "http://127.0.0.1:9545");
	}

	#[test]
	fn rpc_url_selection() {
		let c = Config::default();
		assert_eq!(c.rpc_url(true), "https://carrot.megaeth.com/rpc");
		assert_eq!(c.rpc_url(false), "http://localhost:8545");
	}
}

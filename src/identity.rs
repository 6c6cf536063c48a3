use std::path::PathBuf;

use alloy::primitives::{hex::FromHex, Address, B256};
use alloy::signers::local::PrivateKeySigner;

use crate::error::FaucetError;

/// Who is acting: a Foundry keystore entry or a raw private key.
#[derive(Clone, PartialEq, Eq)]
pub enum Identity {
	Keystore { name: String },
	PrivateKey(String),
}

impl std::fmt::Debug for Identity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Keystore { name } => f.debug_struct("Keystore").field("name", name).finish(),
			Self::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
		}
	}
}

impl Identity {
	/// Build from the mutually exclusive `--account` / `--private-key` flags.
	/// Returns `None` when neither was given.
	pub fn from_flags(account: Option<String>, private_key: Option<String>) -> Option<Self> {
		match (account, private_key) {
			(Some(name), _) => Some(Self::Keystore { name }),
			(None, Some(key)) => Some(Self::PrivateKey(key)),
			(None, None) => None,
		}
	}
}

/// A decrypted signer and the address it controls.
#[derive(Clone, Debug)]
pub struct ResolvedIdentity {
	pub signer: PrivateKeySigner,
	pub address: Address,
}

impl From<PrivateKeySigner> for ResolvedIdentity {
	fn from(signer: PrivateKeySigner) -> Self {
		let address = signer.address();
		Self { signer, address }
	}
}

/// Source of keystore passwords.
pub trait PasswordPrompt: Send + Sync {
	fn password(&self, account: &str) -> anyhow::Result<String>;
}

/// Asks on the terminal without echoing.
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
	fn password(&self, account: &str) -> anyhow::Result<String> {
		let password = dialoguer::Password::new()
			.with_prompt(format!("Enter keystore password for `{account}`"))
			.interact()?;
		Ok(password)
	}
}

/// Foundry's encrypted keystore folder (`~/.foundry/keystores`).
pub struct Keystore {
	dir: PathBuf,
	prompt: Box<dyn PasswordPrompt>,
}

impl Keystore {
	pub fn new(dir: impl Into<PathBuf>, prompt: Box<dyn PasswordPrompt>) -> Self {
		Self { dir: dir.into(), prompt }
	}

	/// The default Foundry keystore folder, unlocked interactively.
	pub fn foundry_default() -> anyhow::Result<Self> {
		let dir = dirs::home_dir()
			.ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?
			.join(".foundry")
			.join("keystores");
		Ok(Self::new(dir, Box::new(TerminalPrompt)))
	}

	/// Locate the keystore file for `name`, accepting both the plain
	/// `<name>` layout and the newer `<name>_0x<address>` one.
	pub fn find(&self, name: &str) -> Option<PathBuf> {
		let direct = self.dir.join(name);
		if direct.is_file() {
			return Some(direct);
		}

		let prefix = format!("{name}_");
		std::fs::read_dir(&self.dir)
			.ok()?
			.flatten()
			.find(|entry| {
				entry.file_name().to_str().is_some_and(|file| {
					file.strip_prefix(&prefix)
						.is_some_and(|rest| Address::parse_checksummed(rest, None).is_ok())
				})
			})
			.map(|entry| entry.path())
	}

	/// Decrypt the named entry, asking for its password.
	pub fn unlock(&self, name: &str) -> Result<PrivateKeySigner, FaucetError> {
		let path = self.find(name).ok_or_else(|| {
			FaucetError::IdentityResolution(format!(
				"no keystore named `{name}` in {}",
				self.dir.display()
			))
		})?;
		let password = self
			.prompt
			.password(name)
			.map_err(|e| FaucetError::IdentityResolution(e.to_string()))?;
		PrivateKeySigner::decrypt_keystore(&path, password).map_err(|e| {
			tracing::debug!(path = %path.display(), error = %e, "keystore decryption failed");
			FaucetError::IdentityResolution(format!(
				"failed to unlock keystore `{name}`, check the account name and password"
			))
		})
	}
}

/// Parse a raw hex private key, with or without `0x`.
pub fn parse_private_key(key: &str) -> Result<PrivateKeySigner, FaucetError> {
	let bytes = B256::from_hex(key.trim())
		.map_err(|_| FaucetError::IdentityResolution("invalid private key format".into()))?;
	PrivateKeySigner::from_bytes(&bytes)
		.map_err(|e| FaucetError::IdentityResolution(format!("invalid private key: {e}")))
}

/// Turn an identity into a signer and address. Performs no network access.
pub fn resolve(identity: &Identity, keystore: &Keystore) -> Result<ResolvedIdentity, FaucetError> {
	let signer = match identity {
		Identity::PrivateKey(key) => parse_private_key(key)?,
		Identity::Keystore { name } => {
			tracing::debug!(account = %name, "unlocking keystore");
			keystore.unlock(name)?
		}
	};
	Ok(signer.into())
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use alloy::primitives::address;
	use std::path::Path;

	/// Anvil's first default account.
	pub const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	pub const ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

	pub struct FixedPassword(pub &'static str);

	impl PasswordPrompt for FixedPassword {
		fn password(&self, _account: &str) -> anyhow::Result<String> {
			Ok(self.0.to_owned())
		}
	}

	fn keystore_with(dir: &Path, name: &str, password: &'static str) -> Keystore {
		let key = B256::from_hex(KEY).unwrap();
		PrivateKeySigner::encrypt_keystore(
			dir,
			&mut rand::thread_rng(),
			key,
			password,
			Some(name),
		)
		.unwrap();
		Keystore::new(dir, Box::new(FixedPassword(password)))
	}

	#[test]
	fn raw_key_resolves_with_or_without_prefix() {
		let ks = Keystore::new("/nonexistent", Box::new(FixedPassword("")));
		let a = resolve(&Identity::PrivateKey(KEY.into()), &ks).unwrap();
		let b = resolve(&Identity::PrivateKey(KEY[2..].into()), &ks).unwrap();
		assert_eq!(a.address, ADDRESS);
		assert_eq!(b.address, ADDRESS);
	}

	#[test]
	fn malformed_keys_are_rejected() {
		let keys = vec![
			String::new(),
			"0x1234".into(),
			"not-a-key".into(),
			format!("{KEY}00"),
			KEY.replace('a', "g"),
		];
		for key in &keys {
			let err = parse_private_key(key).unwrap_err();
			assert!(matches!(err, FaucetError::IdentityResolution(_)), "{key}: {err}");
		}
	}

	#[test]
	fn zero_key_is_rejected() {
		let zero = format!("0x{}", "0".repeat(64));
		assert!(matches!(parse_private_key(&zero), Err(FaucetError::IdentityResolution(_))));
	}

	#[test]
	fn keystore_resolution_is_deterministic() {
		let dir = tempfile::tempdir().unwrap();
		let ks = keystore_with(dir.path(), "dev", "hunter2");
		let identity = Identity::Keystore { name: "dev".into() };

		let first = resolve(&identity, &ks).unwrap();
		let second = resolve(&identity, &ks).unwrap();
		assert_eq!(first.address, ADDRESS);
		assert_eq!(first.address, second.address);
	}

	#[test]
	fn wrong_password_fails_resolution() {
		let dir = tempfile::tempdir().unwrap();
		keystore_with(dir.path(), "dev", "hunter2");
		let ks = Keystore::new(dir.path(), Box::new(FixedPassword("wrong")));

		let err = resolve(&Identity::Keystore { name: "dev".into() }, &ks).unwrap_err();
		assert!(matches!(err, FaucetError::IdentityResolution(_)));
	}

	#[test]
	fn missing_keystore_fails_resolution() {
		let dir = tempfile::tempdir().unwrap();
		let ks = Keystore::new(dir.path(), Box::new(FixedPassword("hunter2")));
		assert!(ks.find("nobody").is_none());
		let err = ks.unlock("nobody").unwrap_err();
		assert!(err.to_string().contains("no keystore named `nobody`"));
	}

	#[test]
	fn finds_address_suffixed_keystores() {
		let dir = tempfile::tempdir().unwrap();
		let file = format!("dev_{}", ADDRESS.to_checksum(None));
		std::fs::write(dir.path().join(&file), "{}").unwrap();
		let ks = Keystore::new(dir.path(), Box::new(FixedPassword("")));

		assert_eq!(ks.find("dev"), Some(dir.path().join(file)));
		assert!(ks.find("de").is_none());
	}

	#[test]
	fn flags_pick_exactly_one_identity() {
		assert_eq!(Identity::from_flags(None, None), None);
		assert_eq!(
			Identity::from_flags(Some("dev".into()), None),
			Some(Identity::Keystore { name: "dev".into() })
		);
		assert_eq!(
			Identity::from_flags(None, Some(KEY.into())),
			Some(Identity::PrivateKey(KEY.into()))
		);
	}

	#[test]
	fn debug_output_hides_raw_keys() {
		let rendered = format!("{:?}", Identity::PrivateKey(KEY.into()));
		assert!(!rendered.contains(&KEY[2..]));

		let ks = Keystore::new("/nonexistent", Box::new(FixedPassword("")));
		let resolved = resolve(&Identity::PrivateKey(KEY.into()), &ks).unwrap();
		assert!(!format!("{resolved:?}").contains(&KEY[2..]));
	}
}

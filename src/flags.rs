//! Translation of mega options into forge arguments.
//!
//! Every command that forwards to forge has an options struct implementing
//! [`FlagTable`], which lists each field next to the forge flag it becomes.

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Ordered forge argument list under construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlagArgs(Vec<String>);

impl FlagArgs {
	pub fn new() -> Self {
		Self::default()
	}

	/// A bare positional argument.
	pub fn arg(&mut self, value: impl Display) -> &mut Self {
		self.0.push(value.to_string());
		self
	}

	/// `flag` when `on`.
	pub fn switch(&mut self, flag: &str, on: bool) -> &mut Self {
		if on {
			self.0.push(flag.to_owned());
		}
		self
	}

	/// `flag value` when a value is present.
	pub fn value<T: Display>(&mut self, flag: &str, value: Option<T>) -> &mut Self {
		if let Some(value) = value {
			self.0.push(flag.to_owned());
			self.0.push(value.to_string());
		}
		self
	}

	/// `flag path` when a path is present.
	pub fn path(&mut self, flag: &str, path: Option<&Path>) -> &mut Self {
		self.value(flag, path.map(Path::display))
	}

	/// `flag a,b,c` for a list of paths.
	pub fn joined_paths(&mut self, flag: &str, paths: &[PathBuf]) -> &mut Self {
		let paths: Vec<_> = paths.iter().map(|p| p.display()).collect();
		self.joined(flag, &paths)
	}

	/// `flag a,b,c` when non-empty.
	pub fn joined<T: Display>(&mut self, flag: &str, values: &[T]) -> &mut Self {
		if !values.is_empty() {
			let joined = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
			self.0.push(flag.to_owned());
			self.0.push(joined);
		}
		self
	}

	/// `flag a b c` when non-empty.
	pub fn many<T: Display>(&mut self, flag: &str, values: &[T]) -> &mut Self {
		if !values.is_empty() {
			self.0.push(flag.to_owned());
			self.0.extend(values.iter().map(ToString::to_string));
		}
		self
	}

	/// Arguments forwarded verbatim.
	pub fn extend(&mut self, values: &[String]) -> &mut Self {
		self.0.extend(values.iter().cloned());
		self
	}

	pub fn into_vec(self) -> Vec<String> {
		self.0
	}
}

/// An options struct with a fixed field-to-flag mapping.
pub trait FlagTable {
	fn write_flags(&self, args: &mut FlagArgs);

	fn to_flags(&self) -> Vec<String> {
		let mut args = FlagArgs::new();
		self.write_flags(&mut args);
		args.into_vec()
	}
}

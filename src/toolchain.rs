//! Invoking Foundry binaries and other external programs.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

/// Binaries a complete Foundry install provides.
pub const FOUNDRY_TOOLS: [&str; 4] = ["forge", "anvil", "cast", "chisel"];

/// Flags whose following value must never reach the logs.
const SECRET_FLAGS: [&str; 3] = ["--private-key", "--password", "--etherscan-api-key"];

/// Flags whose following values, up to the next flag, must never reach the logs.
const SECRET_LIST_FLAGS: [&str; 1] = ["--private-keys"];

/// Copy of `args` with secret values masked, for logging.
pub fn redacted(args: &[String]) -> Vec<&str> {
	let mut out = Vec::with_capacity(args.len());
	let mut hide_next = false;
	let mut hide_list = false;
	for arg in args {
		let arg = arg.as_str();
		if hide_next || (hide_list && !arg.starts_with("--")) {
			out.push("<redacted>");
			hide_next = false;
		} else {
			hide_next = SECRET_FLAGS.contains(&arg);
			hide_list = SECRET_LIST_FLAGS.contains(&arg);
			out.push(arg);
		}
	}
	out
}

/// Whether `program --version` runs successfully.
pub fn is_installed(program: &str) -> bool {
	Command::new(program)
		.arg("--version")
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.status()
		.is_ok_and(|status| status.success())
}

/// Whether every Foundry binary is on the `PATH`.
pub fn foundry_installed() -> bool {
	FOUNDRY_TOOLS.iter().all(|tool| is_installed(tool))
}

/// Fail with setup advice unless `tool` is available.
pub fn ensure_installed(tool: &str) -> Result<()> {
	if is_installed(tool) {
		return Ok(());
	}
	bail!("Foundry is not installed (`{tool}` not found). Run `mega setup` to install Foundry.")
}

/// Run with inherited stdio; a non-zero exit becomes an error.
pub fn run(program: &str, args: &[String]) -> Result<()> {
	run_in(program, args, None)
}

/// Like [`run`], inside `dir` when given.
pub fn run_in(program: &str, args: &[String], dir: Option<&Path>) -> Result<()> {
	tracing::info!(program, args = ?redacted(args), "running");
	let mut cmd = Command::new(program);
	cmd.args(args);
	if let Some(dir) = dir {
		cmd.current_dir(dir);
	}
	let status = cmd
		.status()
		.with_context(|| format!("failed to start `{program}`"))?;
	if !status.success() {
		bail!("`{program}` exited with {status}");
	}
	Ok(())
}

/// Run and return trimmed stdout; stderr is passed through.
pub fn capture(program: &str, args: &[String]) -> Result<String> {
	tracing::info!(program, args = ?redacted(args), "running");
	let output = Command::new(program)
		.args(args)
		.stderr(Stdio::inherit())
		.output()
		.with_context(|| format!("failed to start `{program}`"))?;
	if !output.status.success() {
		bail!("`{program}` exited with {}", output.status);
	}
	Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

/// Run a shell snippet, for installers distributed as `curl | bash`.
pub fn run_shell(script: &str) -> Result<()> {
	run("sh", &["-c".to_owned(), script.to_owned()])
}

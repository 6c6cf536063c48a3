//! `mega dev`: run Anvil and/or the Next.js dev server side by side.
//!
//! Children are owned by the orchestrating task. Anvil's stdout reaches it
//! line by line over a channel, so the "accounts ready" banner state lives
//! in one place and is printed at most once.
//!
//! Shutdown kills the direct children only. A dev server started through a
//! package manager may leave its own children running when `mega` is stopped
//! other than from the terminal; Ctrl-C in a terminal reaches the whole
//! foreground process group.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use yansi::Paint;

use crate::cli::DevArgs;
use crate::project::{self, Detected};
use crate::toolchain;

/// Which services to start, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevPlan {
	pub anvil: Option<PathBuf>,
	pub frontend: Option<PathBuf>,
}

/// Explicit flags win; otherwise start whatever was detected.
pub fn plan(args: &DevArgs, detected: &Detected, cwd: &Path) -> Result<DevPlan> {
	let explicit = args.foundry || args.frontend;
	if !explicit && detected.foundry.is_none() && detected.nextjs.is_none() {
		bail!(
			"no Foundry or Next.js project detected in the current directory or its subdirectories. \
			 Run `mega init` to create one, or pass --foundry or --frontend"
		);
	}

	let start_anvil = args.foundry || (!args.frontend && detected.foundry.is_some());
	let start_frontend = args.frontend || (!args.foundry && detected.nextjs.is_some());

	let frontend = if start_frontend {
		match &detected.nextjs {
			Some(dir) => Some(dir.clone()),
			None => bail!("no Next.js project detected in the current directory or its subdirectories"),
		}
	} else {
		None
	};
	let anvil = start_anvil.then(|| detected.foundry.clone().unwrap_or_else(|| cwd.to_path_buf()));

	Ok(DevPlan { anvil, frontend })
}

/// One-shot marker for Anvil's account listing.
#[derive(Debug, Default)]
pub struct Banner {
	shown: bool,
}

impl Banner {
	/// True for the first line announcing the private keys, false afterwards.
	pub fn observe(&mut self, line: &str) -> bool {
		if self.shown || !line.contains("Private Keys") {
			return false;
		}
		self.shown = true;
		true
	}
}

pub async fn run(args: DevArgs) -> Result<()> {
	let cwd = std::env::current_dir()?;
	let plan = plan(&args, &project::detect(&cwd), &cwd)?;
	tracing::debug!(?plan, "dev plan");

	let (tx, mut lines) = mpsc::unbounded_channel();
	let mut anvil = match &plan.anvil {
		Some(dir) => Some(spawn_anvil(dir, tx.clone())?),
		None => None,
	};
	drop(tx);
	let mut frontend = match &plan.frontend {
		Some(dir) => Some(spawn_frontend(dir)?),
		None => None,
	};

	if anvil.is_some() && frontend.is_some() {
		println!("{}", "\nBoth Anvil local chain and Next.js frontend are running.".green());
		println!("{}", "For cleaner output, you can run them in separate terminals:".yellow());
		println!("{}", "  Terminal 1: mega dev --foundry".cyan());
		println!("{}", "  Terminal 2: mega dev --frontend".cyan());
		println!("{}", "Press Ctrl+C to stop both services.".dim());
	}

	let mut banner = Banner::default();
	let ctrl_c = tokio::signal::ctrl_c();
	tokio::pin!(ctrl_c);

	while anvil.is_some() || frontend.is_some() {
		tokio::select! {
			_ = &mut ctrl_c => {
				println!("{}", "\nShutting down development environment...".yellow());
				stop(&mut anvil).await;
				stop(&mut frontend).await;
			}
			Some(line) = lines.recv() => forward(&mut banner, &line),
			status = wait(&mut anvil) => {
				report("Anvil", status);
				anvil = None;
			}
			status = wait(&mut frontend) => {
				report("Next.js frontend", status);
				frontend = None;
			}
		}
	}
	drain(&mut lines, &mut banner).await;
	Ok(())
}

fn forward(banner: &mut Banner, line: &str) {
	println!("{line}");
	if banner.observe(line) {
		print_banner();
	}
}

/// Print Anvil output still buffered after it exited. Returns the number of
/// lines forwarded.
async fn drain(lines: &mut mpsc::UnboundedReceiver<String>, banner: &mut Banner) -> usize {
	let mut forwarded = 0;
	while let Some(line) = lines.recv().await {
		forward(banner, &line);
		forwarded += 1;
	}
	forwarded
}

fn spawn_anvil(dir: &Path, lines: mpsc::UnboundedSender<String>) -> Result<Child> {
	toolchain::ensure_installed("anvil")?;
	println!(
		"{}",
		format!("Starting Anvil local chain in {}...", dir.display().yellow()).blue()
	);

	let mut child = Command::new("anvil")
		.args(["--host", "0.0.0.0"])
		.current_dir(dir)
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.kill_on_drop(true)
		.spawn()
		.context("failed to start anvil")?;

	if let Some(stdout) = child.stdout.take() {
		tokio::spawn(async move {
			let mut reader = BufReader::new(stdout).lines();
			while let Ok(Some(line)) = reader.next_line().await {
				if lines.send(line).is_err() {
					break;
				}
			}
		});
	}
	if let Some(stderr) = child.stderr.take() {
		tokio::spawn(async move {
			let mut reader = BufReader::new(stderr).lines();
			while let Ok(Some(line)) = reader.next_line().await {
				eprintln!("{line}");
			}
		});
	}
	Ok(child)
}

fn spawn_frontend(dir: &Path) -> Result<Child> {
	println!(
		"{}",
		format!("Starting Next.js frontend in {}...", dir.display().yellow()).blue()
	);
	let manager = project::package_manager(dir);
	println!("{}", format!("Running: {manager} run dev").dim());

	Command::new(manager)
		.args(["run", "dev"])
		.current_dir(dir)
		.kill_on_drop(true)
		.spawn()
		.with_context(|| format!("failed to start `{manager} run dev`"))
}

/// Resolves when the child exits; never, when there is no child.
async fn wait(child: &mut Option<Child>) -> std::io::Result<ExitStatus> {
	match child {
		Some(child) => child.wait().await,
		None => std::future::pending().await,
	}
}

async fn stop(child: &mut Option<Child>) {
	if let Some(mut child) = child.take() {
		if let Err(e) = child.kill().await {
			tracing::debug!(error = %e, "failed to kill child process");
		}
	}
}

fn report(service: &str, status: std::io::Result<ExitStatus>) {
	match status {
		Ok(status) if status.success() => tracing::info!(service, "exited"),
		Ok(status) => eprintln!("{} {status}", format!("{service} exited with").red()),
		Err(e) => eprintln!("{} {e}", format!("{service} error:").red()),
	}
}

fn print_banner() {
	println!("{}", "\n==================================================".yellow());
	println!("{}", "✓ Anvil running successfully!".green());
	println!("{}", "You can use these accounts to deploy contracts with:".cyan());
	println!("{}", "mega deploy <contract> --private-key <KEY>".cyan());
	println!("{}", "==================================================\n".yellow());
}

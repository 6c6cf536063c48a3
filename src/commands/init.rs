use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use yansi::Paint;

use crate::cli::InitArgs;
use crate::project;
use crate::toolchain;

/// Starter template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
	Fullstack,
	Frontend,
	Foundry,
}

impl ProjectKind {
	pub fn from_flags(frontend: bool, foundry: bool) -> Self {
		if frontend {
			Self::Frontend
		} else if foundry {
			Self::Foundry
		} else {
			Self::Fullstack
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Fullstack => "fullstack",
			Self::Frontend => "frontend",
			Self::Foundry => "foundry",
		}
	}

	pub fn repo_url(self) -> &'static str {
		match self {
			Self::Fullstack => "https://github.com/awesamarth/mega-starter-full",
			Self::Frontend => "https://github.com/awesamarth/mega-starter-frontend",
			Self::Foundry => "https://github.com/awesamarth/mega-starter-foundry",
		}
	}

	pub fn default_dir(self) -> String {
		format!("mega-{}-app", self.name())
	}

	/// Where the Next.js app lives inside a fresh project, if it has one.
	pub fn frontend_dir(self) -> Option<&'static str> {
		match self {
			Self::Fullstack => Some("next-app"),
			Self::Frontend => Some("."),
			Self::Foundry => None,
		}
	}

	fn dev_hint(self) -> (&'static str, &'static str) {
		match self {
			Self::Fullstack => ("mega dev", "to start both frontend and foundry environments"),
			Self::Frontend => ("mega dev --frontend", "to start the Next.js development server"),
			Self::Foundry => ("mega dev --foundry", "to start the Anvil local chain"),
		}
	}
}

pub fn run(args: InitArgs) -> Result<()> {
	let kind = ProjectKind::from_flags(args.frontend, args.foundry);
	let name = match args.name {
		Some(name) => name,
		None => prompt_name(kind)?,
	};
	let dir = PathBuf::from(&name);
	check_target(&dir)?;

	println!(
		"{}",
		format!("Creating a new {} project in {}...", kind.name(), name.yellow()).blue()
	);
	println!("{}", format!("Cloning from {}...", kind.repo_url()).dim());
	toolchain::run("git", &["clone".into(), kind.repo_url().into(), name.clone()])?;

	let git_dir = dir.join(".git");
	if git_dir.exists() {
		std::fs::remove_dir_all(&git_dir)
			.with_context(|| format!("failed to remove {}", git_dir.display()))?;
	}
	println!("{}", "Initializing a new git repository...".dim());
	toolchain::run_in("git", &["init".into(), "--quiet".into()], Some(&dir))?;

	if let Some(frontend) = kind.frontend_dir() {
		println!("{}", "Installing dependencies...".blue());
		install_frontend(&dir.join(frontend));
	}

	println!("\n{} Project created successfully!", "✓".green());
	println!("\nNext steps:");
	println!("  {} {name}", "cd".cyan());
	let (command, about) = kind.dev_hint();
	println!("  {} {about}", command.cyan());
	Ok(())
}

fn prompt_name(kind: ProjectKind) -> Result<String> {
	let name: String = dialoguer::Input::new()
		.with_prompt("Enter a name for your project")
		.default(kind.default_dir())
		.validate_with(|input: &String| check_target(Path::new(input)).map_err(|e| e.to_string()))
		.interact_text()?;
	Ok(name)
}

/// The project directory must be named and must not exist yet.
pub fn check_target(dir: &Path) -> Result<()> {
	if dir.as_os_str().is_empty() || dir.to_string_lossy().trim().is_empty() {
		bail!("project name cannot be empty");
	}
	if dir.exists() {
		bail!("directory '{}' already exists", dir.display());
	}
	Ok(())
}

/// Failures only warn; the project is still usable.
fn install_frontend(dir: &Path) {
	let manager = project::package_manager(dir);
	println!("{}", format!("Installing frontend dependencies with {manager}...").dim());
	if let Err(e) = toolchain::run_in(manager, &["install".into()], Some(dir)) {
		tracing::debug!(error = %e, "frontend install failed");
		println!(
			"{}",
			"\nWarning: Frontend dependency installation failed. You'll need to install them manually."
				.yellow()
		);
	}
}

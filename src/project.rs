use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Projects found by scanning a directory and its direct children.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Detected {
	pub foundry: Option<PathBuf>,
	pub nextjs: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
	#[serde(default)]
	dependencies: serde_json::Map<String, serde_json::Value>,
	#[serde(default)]
	dev_dependencies: serde_json::Map<String, serde_json::Value>,
}

pub fn is_foundry_project(dir: &Path) -> bool {
	dir.join("foundry.toml").is_file()
}

/// A directory whose `package.json` depends on `next`.
pub fn is_nextjs_project(dir: &Path) -> bool {
	let Ok(content) = std::fs::read_to_string(dir.join("package.json")) else {
		return false;
	};
	match serde_json::from_str::<PackageJson>(&content) {
		Ok(pkg) => pkg.dependencies.contains_key("next") || pkg.dev_dependencies.contains_key("next"),
		Err(e) => {
			tracing::debug!(dir = %dir.display(), error = %e, "unreadable package.json");
			false
		}
	}
}

/// Look in `dir` first, then one level of subdirectories (sorted by name).
pub fn detect(dir: &Path) -> Detected {
	let mut found = Detected {
		foundry: is_foundry_project(dir).then(|| dir.to_path_buf()),
		nextjs: is_nextjs_project(dir).then(|| dir.to_path_buf()),
	};
	if found.foundry.is_some() && found.nextjs.is_some() {
		return found;
	}

	let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
		.map(|entries| {
			entries
				.flatten()
				.map(|entry| entry.path())
				.filter(|path| path.is_dir())
				.collect()
		})
		.unwrap_or_default();
	subdirs.sort();

	if found.foundry.is_none() {
		found.foundry = subdirs.iter().find(|d| is_foundry_project(d)).cloned();
	}
	if found.nextjs.is_none() {
		found.nextjs = subdirs.iter().find(|d| is_nextjs_project(d)).cloned();
	}
	found
}

/// Package manager implied by the lockfile present in `dir`.
pub fn package_manager(dir: &Path) -> &'static str {
	if dir.join("yarn.lock").exists() {
		"yarn"
	} else if dir.join("pnpm-lock.yaml").exists() {
		"pnpm"
	} else {
		"npm"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn nextjs_app(dir: &Path, dev: bool) {
		let key = if dev { "devDependencies" } else { "dependencies" };
		fs::write(
			dir.join("package.json"),
			format!(r#"{{"name":"app","{key}":{{"next":"14.0.0","react":"18"}}}}"#),
		)
		.unwrap();
	}

	#[test]
	fn detects_projects_in_place() {
		let root = tempfile::tempdir().unwrap();
		fs::write(root.path().join("foundry.toml"), "[profile.default]\n").unwrap();
		nextjs_app(root.path(), false);

		let found = detect(root.path());
		assert_eq!(found.foundry.as_deref(), Some(root.path()));
		assert_eq!(found.nextjs.as_deref(), Some(root.path()));
	}

	#[test]
	fn detects_projects_one_level_down() {
		let root = tempfile::tempdir().unwrap();
		let contracts = root.path().join("contracts");
		let web = root.path().join("next-app");
		fs::create_dir_all(&contracts).unwrap();
		fs::create_dir_all(&web).unwrap();
		fs::write(contracts.join("foundry.toml"), "").unwrap();
		nextjs_app(&web, true);

		let found = detect(root.path());
		assert_eq!(found.foundry, Some(contracts));
		assert_eq!(found.nextjs, Some(web));
	}

	#[test]
	fn ignores_deeper_and_non_next_projects() {
		let root = tempfile::tempdir().unwrap();
		let deep = root.path().join("a").join("b");
		fs::create_dir_all(&deep).unwrap();
		fs::write(deep.join("foundry.toml"), "").unwrap();
		fs::write(root.path().join("package.json"), r#"{"dependencies":{"react":"18"}}"#).unwrap();

		assert_eq!(detect(root.path()), Detected::default());
	}

	#[test]
	fn malformed_package_json_is_not_next() {
		let root = tempfile::tempdir().unwrap();
		fs::write(root.path().join("package.json"), "{ not json").unwrap();
		assert!(!is_nextjs_project(root.path()));
	}

	#[test]
	fn package_manager_follows_lockfile() {
		let root = tempfile::tempdir().unwrap();
		assert_eq!(package_manager(root.path()), "npm");
		fs::write(root.path().join("pnpm-lock.yaml"), "").unwrap();
		assert_eq!(package_manager(root.path()), "pnpm");
		fs::write(root.path().join("yarn.lock"), "").unwrap();
		assert_eq!(package_manager(root.path()), "yarn");
	}
}

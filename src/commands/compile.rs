use anyhow::Result;
use yansi::Paint;

use crate::cli::CompileArgs;
use crate::flags::{FlagArgs, FlagTable};
use crate::toolchain;

pub fn run(args: &CompileArgs) -> Result<()> {
	toolchain::ensure_installed("forge")?;
	println!("{}", "Compiling contracts...".blue());

	let mut forge = FlagArgs::new();
	forge.arg("build");
	args.write_flags(&mut forge);
	// forge prints its own diagnostics.
	toolchain::run("forge", &forge.into_vec())
}

impl FlagTable for CompileArgs {
	fn write_flags(&self, f: &mut FlagArgs) {
		f.switch("--names", self.names)
			.switch("--sizes", self.sizes)
			.many("--skip", &self.skip)
			.switch("--force", self.force)
			.joined("--libraries", &self.libraries)
			.switch("--optimize", self.optimize)
			.value("--optimizer-runs", self.optimizer_runs)
			.switch("--via-ir", self.via_ir)
			.value("--revert-strings", self.revert_strings.as_ref())
			.value("--use", self.use_solc.as_ref())
			.switch("--offline", self.offline)
			.switch("--no-auto-detect", self.no_auto_detect)
			.joined("--ignored-error-codes", &self.ignored_error_codes)
			.joined("--extra-output", &self.extra_output)
			.joined("--extra-output-files", &self.extra_output_files)
			.value("--evm-version", self.evm_version.as_ref());
		self.project.write_flags(f);
		f.path("--out", self.out.as_deref())
			.switch("--silent", self.silent);

		if let Some(paths) = &self.watch {
			f.arg("--watch");
			for path in paths {
				f.arg(path.display());
			}
		}
		f.value("--delay", self.delay.as_ref())
			.switch("--no-restart", self.no_restart)
			.switch("--run-all", self.run_all)
			.extend(&self.passthrough);
	}
}

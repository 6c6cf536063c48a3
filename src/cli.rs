use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "mega",
	about = "A complete development environment for MegaETH.",
	version
)]
pub struct Cli {
	/// Increase log verbosity (-v info, -vv debug).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
	/// Create a new Next.js/Foundry/full-stack project pre-configured for MegaETH.
	Init(InitArgs),

	/// Start development environments.
	Dev(DevArgs),

	/// Check and install dependencies (Foundry).
	Setup {
		/// Only check whether dependencies are installed.
		#[arg(long)]
		check: bool,
	},

	/// Compile Solidity contracts using Foundry.
	#[command(visible_alias = "build")]
	Compile(CompileArgs),

	/// Deploy a contract to the local network or the MegaETH testnet.
	#[command(visible_alias = "create")]
	Deploy(DeployArgs),

	/// Verify a contract on the block explorer.
	Verify(VerifyArgs),

	/// Manage accounts and wallets.
	Account {
		#[command(subcommand)]
		command: AccountCommand,
	},

	/// Get the balance of an account or address on the MegaETH testnet.
	Balance(BalanceArgs),

	/// Request test tokens from the MegaETH testnet faucet.
	Faucet(FaucetArgs),
}

// -- Project subcommands --

#[derive(Args)]
pub struct InitArgs {
	/// Directory to create; prompted for when omitted.
	pub name: Option<String>,

	/// Create a frontend-only project (Next.js + WalletConnect).
	#[arg(long, conflicts_with = "foundry")]
	pub frontend: bool,

	/// Create a Foundry-only project configured for the MegaETH testnet.
	#[arg(long)]
	pub foundry: bool,
}

#[derive(Args)]
pub struct DevArgs {
	/// Start only the Anvil local chain.
	#[arg(long)]
	pub foundry: bool,

	/// Start only the Next.js frontend.
	#[arg(long)]
	pub frontend: bool,
}

// -- Forge passthrough subcommands --

#[derive(Args, Default)]
pub struct CompileArgs {
	/// Print compiled contract names.
	#[arg(long)]
	pub names: bool,

	/// Print compiled non-test contract sizes.
	#[arg(long)]
	pub sizes: bool,

	/// Skip compilation of specific directories.
	#[arg(long, num_args = 1..)]
	pub skip: Vec<String>,

	/// Clear the cache and recompile.
	#[arg(long)]
	pub force: bool,

	/// Set pre-linked libraries.
	#[arg(long, num_args = 1..)]
	pub libraries: Vec<String>,

	/// Activate the Solidity optimizer.
	#[arg(long)]
	pub optimize: bool,

	/// The number of optimizer runs.
	#[arg(long)]
	pub optimizer_runs: Option<u64>,

	/// Use the Yul intermediate representation compilation pipeline.
	#[arg(long)]
	pub via_ir: bool,

	/// How to treat revert and require reason strings.
	#[arg(long)]
	pub revert_strings: Option<String>,

	/// Specify the solc version to build with.
	#[arg(long = "use", value_name = "VERSION")]
	pub use_solc: Option<String>,

	/// Do not access the network for missing solc versions.
	#[arg(long)]
	pub offline: bool,

	/// Do not auto-detect solc.
	#[arg(long)]
	pub no_auto_detect: bool,

	/// Ignore solc warnings by error code.
	#[arg(long, num_args = 1..)]
	pub ignored_error_codes: Vec<String>,

	/// Extra output to include in artifacts.
	#[arg(long, num_args = 1..)]
	pub extra_output: Vec<String>,

	/// Extra output to write to separate files.
	#[arg(long, num_args = 1..)]
	pub extra_output_files: Vec<String>,

	/// The target EVM version.
	#[arg(long)]
	pub evm_version: Option<String>,

	#[command(flatten)]
	pub project: ProjectArgs,

	/// Output path for the compiled artifacts.
	#[arg(short, long)]
	pub out: Option<PathBuf>,

	/// Suppress all output.
	#[arg(long)]
	pub silent: bool,

	/// Watch specific files or folders.
	#[arg(short, long, num_args = 0..)]
	pub watch: Option<Vec<PathBuf>>,

	/// File update debounce delay.
	#[arg(short, long)]
	pub delay: Option<String>,

	/// Do not restart the command while it's running.
	#[arg(long)]
	pub no_restart: bool,

	/// Re-run the command on all files when a change is made.
	#[arg(long)]
	pub run_all: bool,

	/// Extra arguments passed to forge unchanged (after `--`).
	#[arg(last = true)]
	pub passthrough: Vec<String>,
}

/// Project layout options shared by `compile` and `verify`.
#[derive(Args, Default)]
pub struct ProjectArgs {
	/// Generate build info files.
	#[arg(long)]
	pub build_info: bool,

	/// Output path for build info files.
	#[arg(long)]
	pub build_info_path: Option<PathBuf>,

	/// The project's root path.
	#[arg(long)]
	pub root: Option<PathBuf>,

	/// The contracts source directory.
	#[arg(short = 'C', long)]
	pub contracts: Option<PathBuf>,

	/// The path to the library folder.
	#[arg(long, num_args = 1..)]
	pub lib_paths: Vec<PathBuf>,

	/// The project's remappings.
	#[arg(short = 'R', long, num_args = 1..)]
	pub remappings: Vec<String>,

	/// The path to the compiler cache.
	#[arg(long)]
	pub cache_path: Option<PathBuf>,

	/// Path to the config file.
	#[arg(long)]
	pub config_path: Option<PathBuf>,

	/// Use Hardhat-style paths.
	#[arg(long, visible_alias = "hh")]
	pub hardhat: bool,
}

#[derive(Args, Default)]
pub struct DeployArgs {
	/// Contract to deploy, as `path:Name`.
	pub contract: String,

	/// Deploy to the MegaETH testnet instead of the local network.
	#[arg(long)]
	pub testnet: bool,

	/// Broadcast the transaction instead of doing a dry run.
	#[arg(long)]
	pub broadcast: bool,

	/// The constructor arguments.
	#[arg(long, num_args = 1.., allow_hyphen_values = true)]
	pub constructor_args: Vec<String>,

	/// Path to a file containing the constructor arguments.
	#[arg(long)]
	pub constructor_args_path: Option<PathBuf>,

	/// Verify the contract after creation.
	#[arg(long)]
	pub verify: bool,

	/// The verification provider (etherscan, sourcify, blockscout).
	#[arg(long)]
	pub verifier: Option<String>,

	/// Verifier URL for submitting the verification request.
	#[arg(long)]
	pub verifier_url: Option<String>,

	/// Send via `eth_sendTransaction` using `--from` as sender.
	#[arg(long)]
	pub unlocked: bool,

	/// Gas limit for the transaction.
	#[arg(long)]
	pub gas_limit: Option<String>,

	/// Gas price for the transaction.
	#[arg(long)]
	pub gas_price: Option<String>,

	/// Max priority fee per gas for EIP-1559 transactions.
	#[arg(long)]
	pub priority_gas_price: Option<String>,

	/// Ether to send in the transaction.
	#[arg(long)]
	pub value: Option<String>,

	/// Nonce for the transaction.
	#[arg(long)]
	pub nonce: Option<u64>,

	/// Send a legacy transaction instead of an EIP-1559 one.
	#[arg(long)]
	pub legacy: bool,

	#[command(flatten)]
	pub wallet: WalletArgs,

	/// Activate the Solidity optimizer.
	#[arg(long)]
	pub optimize: bool,

	/// The number of optimizer runs.
	#[arg(long)]
	pub optimizer_runs: Option<u64>,

	/// Set pre-linked libraries.
	#[arg(long, num_args = 1..)]
	pub libraries: Vec<String>,

	/// Print the deployment information as JSON.
	#[arg(short, long)]
	pub json: bool,

	/// Extra arguments passed to forge unchanged (after `--`).
	#[arg(last = true)]
	pub passthrough: Vec<String>,
}

/// Signing options forwarded to `forge create`.
#[derive(Args, Default, Clone)]
pub struct WalletArgs {
	/// Open an interactive prompt to enter private keys.
	#[arg(short, long, value_name = "NUM")]
	pub interactive: Option<u32>,

	/// Use the provided private key.
	#[arg(long)]
	pub private_key: Option<String>,

	/// Use the provided private keys.
	#[arg(long, num_args = 1..)]
	pub private_keys: Vec<String>,

	/// Use the keystore in the given folder or file.
	#[arg(long)]
	pub keystore: Option<PathBuf>,

	/// Use a keystore account from the default keystores folder.
	#[arg(long)]
	pub account: Option<String>,

	/// The keystore password.
	#[arg(long)]
	pub password: Option<String>,

	/// Sign the transaction with the specified account on the RPC.
	#[arg(short, long)]
	pub from: Option<Address>,
}

impl WalletArgs {
	pub fn is_empty(&self) -> bool {
		self.interactive.is_none()
			&& self.private_key.is_none()
			&& self.private_keys.is_empty()
			&& self.keystore.is_none()
			&& self.account.is_none()
			&& self.from.is_none()
	}
}

#[derive(Args, Default)]
pub struct VerifyArgs {
	/// Address of the deployed contract.
	pub address: Address,

	/// Contract to verify, as `path:Name`.
	pub contract: String,

	/// The verification provider (etherscan, sourcify, blockscout).
	#[arg(long, default_value = "etherscan")]
	pub verifier: String,

	/// Verifier URL for submitting the verification request.
	#[arg(long)]
	pub verifier_url: Option<String>,

	/// Send the request even if the contract is already verified.
	#[arg(long)]
	pub skip_is_verified_check: bool,

	/// The compiler version used to build the contract.
	#[arg(long)]
	pub compiler_version: Option<String>,

	/// The number of optimization runs used to build the contract.
	#[arg(long)]
	pub num_of_optimizations: Option<u64>,

	/// Alias of `--num-of-optimizations`.
	#[arg(long)]
	pub optimizer_runs: Option<u64>,

	/// The ABI-encoded constructor arguments.
	#[arg(long)]
	pub constructor_args: Option<String>,

	/// Path to a file containing the constructor arguments.
	#[arg(long)]
	pub constructor_args_path: Option<PathBuf>,

	/// Flatten the source code before verifying.
	#[arg(long)]
	pub flatten: bool,

	/// Do not compile the flattened contract before verifying.
	#[arg(short, long)]
	pub force: bool,

	/// Seconds to wait between attempts.
	#[arg(long)]
	pub delay: Option<u64>,

	/// Number of attempts.
	#[arg(long)]
	pub retries: Option<u32>,

	/// Print the standard JSON input instead of submitting it.
	#[arg(long)]
	pub show_standard_json_input: bool,

	/// Wait for the verification result after submission.
	#[arg(long)]
	pub watch: bool,

	/// Set viaIR to true.
	#[arg(long)]
	pub via_ir: bool,

	/// Block explorer API key.
	#[arg(long)]
	pub etherscan_api_key: Option<String>,

	#[command(flatten)]
	pub project: ProjectArgs,

	/// Extra arguments passed to forge unchanged (after `--`).
	#[arg(last = true)]
	pub passthrough: Vec<String>,
}

// -- Account subcommands --

#[derive(Subcommand)]
pub enum AccountCommand {
	/// Create a new wallet and store it in the keystore under a name.
	Create {
		/// Wallet name; prompted for when omitted.
		name: Option<String>,
	},

	/// List all keystore accounts.
	List,

	/// Import an existing private key under a name.
	Import {
		/// Wallet name; prompted for when omitted.
		name: Option<String>,
	},
}

// -- Chain queries --

#[derive(Args)]
pub struct BalanceArgs {
	/// Address to query.
	pub address: Option<Address>,

	/// Use an account from the keystore instead of an address.
	#[arg(long)]
	pub account: Option<String>,

	/// Show the balance in ether instead of wei.
	#[arg(short, long)]
	pub ether: bool,
}

#[derive(Args)]
pub struct FaucetArgs {
	/// Use a keystore account from the default keystores folder.
	#[arg(long, conflicts_with = "private_key")]
	pub account: Option<String>,

	/// Use the provided private key.
	#[arg(long)]
	pub private_key: Option<String>,

	/// Report the new balance in wei instead of ether.
	#[arg(long)]
	pub wei: bool,
}

use crate::domain::constants::*;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relsign", version, about = "Release pipeline signing helpers")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build ESRP descriptors for every file in PATH and run the signing client
    Sign {
        /// Directory holding the files to sign (not searched recursively)
        path: PathBuf,
        /// Platform-specific key code
        keycode: String,
        /// Platform-specific operation code
        opcode: String,
        #[arg(
            long,
            num_args = 1..,
            allow_hyphen_values = true,
            value_name = "KEY VALUE",
            help = "Extra signing parameters as key/value pairs"
        )]
        params: Vec<String>,
        #[arg(
            long,
            env = "ESRP_TOOL",
            default_value = DEFAULT_ESRP_TOOL,
            help = "Signing client executable (relative paths resolve in the workspace)"
        )]
        esrp_tool: PathBuf,
    },
    /// Locate a release asset by name pattern and print its download URL
    FetchAsset {
        #[arg(long, default_value = DEFAULT_RELEASE_REPO)]
        repo: String,
        #[arg(long, default_value = DEFAULT_ASSET_PATTERN, help = "Regex matched against asset names")]
        pattern: String,
        #[arg(long, default_value = DEFAULT_GITHUB_API)]
        api_url: String,
        #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_SECS, help = "Seconds to wait before the single retry")]
        retry_delay: u64,
        #[arg(long, help = "Download the asset to this path")]
        output: Option<PathBuf>,
    },
    /// Write the package-repository client config from the environment
    RepoConfig {
        #[arg(long, default_value = REPO_CONFIG_FILE)]
        output: PathBuf,
    },
    /// Check that the imported GPG signing key is in the secret keyring
    VerifyKey {
        fingerprint: String,
        #[arg(long, default_value = "gpg")]
        gpg: PathBuf,
    },
}

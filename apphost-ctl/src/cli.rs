use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use apphost::Platform;

#[derive(Parser)]
#[command(name = "apphost-ctl")]
#[command(version, about = "Run and inspect the apphost startup sequence", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Start a coordinator (children default to no sandbox)
    apphost-ctl launch
    apphost-ctl --resource-dir ./out launch --type=renderer --enable-sandbox

    # Relaunch a program through the relauncher role
    apphost-ctl launch --type=relauncher -- /usr/bin/app --restarted

    # Show the decisions for an invocation without running it
    apphost-ctl inspect --type=renderer --enable-mixed-sandbox
    apphost-ctl --platform macos inspect --type=gpu-process

    # List recognized roles
    apphost-ctl roles
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the resource packs
    #[arg(short, long, value_name = "PATH", global = true)]
    pub resource_dir: Option<PathBuf>,

    /// Platform to evaluate decisions for (defaults to the host platform)
    #[arg(short, long, value_enum, value_name = "PLATFORM", global = true)]
    pub platform: Option<PlatformArg>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full startup sequence for an invocation
    Launch {
        /// Invocation switches and arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the startup decisions for an invocation as JSON
    Inspect {
        /// Invocation switches and arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List recognized process roles
    Roles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Linux,
    Macos,
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Linux => Platform::Linux,
            PlatformArg::Macos => Platform::MacOs,
            PlatformArg::Windows => Platform::Windows,
        }
    }
}

//! Relaunch routine: start the command after `--` and exit

use std::process::Command;

use apphost::{InvocationFlags, MainParams, Relauncher, Result, StartupError};
use log::{error, info};

pub struct SpawnRelauncher;

impl SpawnRelauncher {
    /// Spawn the replacement process without waiting for it
    fn spawn(flags: &InvocationFlags) -> Result<u32> {
        let (program, args) = flags.positional().split_first().ok_or_else(|| {
            StartupError::Relaunch("no command given after --".to_string())
        })?;

        info!("Relaunching {} {:?}", program, args);
        let child = Command::new(program)
            .args(args)
            .spawn()
            .map_err(|e| StartupError::Relaunch(format!("{}: {}", program, e)))?;
        Ok(child.id())
    }
}

impl Relauncher for SpawnRelauncher {
    fn relauncher_main(&mut self, params: MainParams<'_>) -> i32 {
        match Self::spawn(params.flags) {
            Ok(pid) => {
                info!("Relaunched as pid {}", pid);
                0
            }
            Err(e) => {
                error!("{}", e);
                1
            }
        }
    }
}

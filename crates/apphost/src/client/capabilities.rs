//! What a role client exposes to the code it runs

use serde::Serialize;

/// Capability set of a role client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    /// Full embedded scripting runtime with native modules
    pub script_runtime: bool,
    /// Direct filesystem access from script
    pub filesystem: bool,
    /// Can start other OS processes
    pub spawn_processes: bool,
    /// Preload scripts with a message bridge to the coordinator
    pub preload_bridge: bool,
    /// Parses and executes externally supplied content
    pub hosts_content: bool,
}

impl CapabilitySet {
    pub fn coordinator() -> Self {
        Self {
            script_runtime: true,
            filesystem: true,
            spawn_processes: true,
            preload_bridge: false,
            hosts_content: false,
        }
    }

    pub fn renderer() -> Self {
        Self {
            script_runtime: true,
            filesystem: true,
            spawn_processes: true,
            preload_bridge: true,
            hosts_content: true,
        }
    }

    /// Only the bridge survives isolation
    pub fn sandboxed_renderer() -> Self {
        Self {
            preload_bridge: true,
            hosts_content: true,
            ..Self::default()
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let check = |available: bool| if available { "[ok]" } else { "[--]" };
        [
            format!("{} Script runtime", check(self.script_runtime)),
            format!("{} Filesystem", check(self.filesystem)),
            format!("{} Spawn processes", check(self.spawn_processes)),
            format!("{} Preload bridge", check(self.preload_bridge)),
            format!("{} Hosts content", check(self.hosts_content)),
        ]
        .join("\n")
    }
}

//! Process roles and classification of the running process

use std::fmt;

use serde::Serialize;

use crate::flags::InvocationFlags;
use crate::switches::{self, process_type};

/// What this OS process is within the host.
///
/// Derived once from the `--type` switch and fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "identifier", rename_all = "snake_case")]
pub enum ProcessRole {
    /// The process without a role switch; owns every other process
    Coordinator,
    Renderer,
    Utility,
    GpuWorker,
    PluginWorker,
    PluginBroker,
    /// Forks renderers and opens resources on their behalf (POSIX)
    ZygoteSpawner,
    /// Spawns a replacement coordinator and exits
    Relauncher,
    /// A worker kind this layer does not special-case; keeps the raw identifier
    OtherWorker(String),
}

impl ProcessRole {
    /// Map a role identifier to its tag. Unknown identifiers are valid workers.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "" => ProcessRole::Coordinator,
            process_type::RENDERER => ProcessRole::Renderer,
            process_type::UTILITY => ProcessRole::Utility,
            process_type::GPU => ProcessRole::GpuWorker,
            process_type::PPAPI_PLUGIN => ProcessRole::PluginWorker,
            process_type::PPAPI_BROKER => ProcessRole::PluginBroker,
            process_type::ZYGOTE => ProcessRole::ZygoteSpawner,
            process_type::RELAUNCHER => ProcessRole::Relauncher,
            other => ProcessRole::OtherWorker(other.to_string()),
        }
    }

    /// Identifier written after `--type=` when spawning this role
    pub fn identifier(&self) -> &str {
        match self {
            ProcessRole::Coordinator => "",
            ProcessRole::Renderer => process_type::RENDERER,
            ProcessRole::Utility => process_type::UTILITY,
            ProcessRole::GpuWorker => process_type::GPU,
            ProcessRole::PluginWorker => process_type::PPAPI_PLUGIN,
            ProcessRole::PluginBroker => process_type::PPAPI_BROKER,
            ProcessRole::ZygoteSpawner => process_type::ZYGOTE,
            ProcessRole::Relauncher => process_type::RELAUNCHER,
            ProcessRole::OtherWorker(id) => id,
        }
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self, ProcessRole::Coordinator)
    }

    pub fn is_relauncher(&self) -> bool {
        matches!(self, ProcessRole::Relauncher)
    }

    /// Every role with a fixed identifier
    pub fn known() -> [ProcessRole; 8] {
        [
            ProcessRole::Coordinator,
            ProcessRole::Renderer,
            ProcessRole::Utility,
            ProcessRole::GpuWorker,
            ProcessRole::PluginWorker,
            ProcessRole::PluginBroker,
            ProcessRole::ZygoteSpawner,
            ProcessRole::Relauncher,
        ]
    }
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessRole::Coordinator => write!(f, "coordinator"),
            ProcessRole::OtherWorker(id) => write!(f, "other({})", id),
            role => write!(f, "{}", role.identifier()),
        }
    }
}

/// Classify the running process from its invocation flags.
pub fn classify(flags: &InvocationFlags) -> ProcessRole {
    ProcessRole::from_identifier(flags.switch_value(switches::PROCESS_TYPE).unwrap_or_default())
}

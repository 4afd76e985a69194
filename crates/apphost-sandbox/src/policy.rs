//! Sandbox policy of a process

use std::fmt;

use apphost_core::switches;
use apphost_core::InvocationFlags;
use serde::Serialize;

/// Isolation requested for the processes of this host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SandboxPolicy {
    /// Full isolation; the setuid helper is disabled since namespace
    /// isolation already covers it
    Strict,
    /// Isolation explicitly disabled
    NoSandbox,
    /// The caller opted out of the automatic decision and manages isolation
    Mixed,
}

impl SandboxPolicy {
    /// Policy of a worker, read from the switches its coordinator wrote.
    ///
    /// Without an explicit opt-out a worker is treated as isolated.
    pub fn from_inherited(flags: &InvocationFlags) -> Self {
        if flags.has_switch(switches::ENABLE_SANDBOX) {
            SandboxPolicy::Strict
        } else if flags.has_switch(switches::NO_SANDBOX) {
            SandboxPolicy::NoSandbox
        } else if flags.has_switch(switches::ENABLE_MIXED_SANDBOX) {
            SandboxPolicy::Mixed
        } else {
            SandboxPolicy::Strict
        }
    }

    /// Whether renderers run the isolated client variant
    pub fn isolates_renderer(&self) -> bool {
        !matches!(self, SandboxPolicy::NoSandbox)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxPolicy::Strict => "strict",
            SandboxPolicy::NoSandbox => "no_sandbox",
            SandboxPolicy::Mixed => "mixed",
        }
    }
}

impl fmt::Display for SandboxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

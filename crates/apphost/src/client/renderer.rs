//! Renderer clients
//!
//! The two variants are interchangeable from the host's point of view; they
//! differ in the capability set exposed to the content they run.

use apphost_core::Result;
use apphost_sandbox::SandboxPolicy;

use super::{CapabilitySet, ClientKind, Lifecycle, RoleBehavior};

/// Renderer with the full scripting runtime
#[derive(Debug)]
pub struct RendererClient {
    policy: SandboxPolicy,
    lifecycle: Lifecycle,
}

impl RendererClient {
    pub fn new(policy: SandboxPolicy) -> Self {
        Self {
            policy,
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn policy(&self) -> SandboxPolicy {
        self.policy
    }
}

impl RoleBehavior for RendererClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Renderer
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::renderer()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn initialize(&mut self) -> Result<()> {
        self.lifecycle.start(self.kind());
        Ok(())
    }

    fn shutdown(&mut self) {
        self.lifecycle.stop(self.kind());
    }
}

/// Isolated renderer; content only reaches the coordinator through the
/// preload bridge
#[derive(Debug)]
pub struct SandboxedRendererClient {
    policy: SandboxPolicy,
    lifecycle: Lifecycle,
}

impl SandboxedRendererClient {
    pub fn new(policy: SandboxPolicy) -> Self {
        debug_assert!(policy.isolates_renderer());
        Self {
            policy,
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn policy(&self) -> SandboxPolicy {
        self.policy
    }
}

impl RoleBehavior for SandboxedRendererClient {
    fn kind(&self) -> ClientKind {
        ClientKind::SandboxedRenderer
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::sandboxed_renderer()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn initialize(&mut self) -> Result<()> {
        self.lifecycle.start(self.kind());
        Ok(())
    }

    fn shutdown(&mut self) {
        self.lifecycle.stop(self.kind());
    }
}

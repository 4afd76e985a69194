//! Utility client and the passthrough client for roles without host-specific
//! behavior

use apphost_core::{ProcessRole, Result};

use super::{CapabilitySet, ClientKind, Lifecycle, RoleBehavior};

#[derive(Debug)]
pub struct UtilityClient {
    lifecycle: Lifecycle,
}

impl UtilityClient {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Created,
        }
    }
}

impl Default for UtilityClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleBehavior for UtilityClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Utility
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::none()
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

/// Leaves the process to the embedding framework's defaults
#[derive(Debug)]
pub struct PassthroughClient {
    role: ProcessRole,
    lifecycle: Lifecycle,
}

impl PassthroughClient {
    pub fn new(role: ProcessRole) -> Self {
        Self {
            role,
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn role(&self) -> &ProcessRole {
        &self.role
    }
}

impl RoleBehavior for PassthroughClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Passthrough
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::none()
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

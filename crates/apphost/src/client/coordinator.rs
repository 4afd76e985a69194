//! Coordinator client: owns the child launch configuration

use std::path::PathBuf;

use apphost_core::flags::format_switch;
use apphost_core::{switches, InvocationFlags, ProcessRole, Result};
use apphost_resources::resolve_locale;
use apphost_sandbox::{ChildLaunchConfig, SandboxPolicy};
use log::debug;

use super::{CapabilitySet, ClientKind, Lifecycle, RoleBehavior};

/// Coordinator switches every child inherits verbatim
const INHERITED_SWITCHES: &[&str] = &[
    switches::ENABLE_LOGGING,
    switches::ENABLE_SANDBOX,
    switches::ENABLE_MIXED_SANDBOX,
    switches::NO_SANDBOX,
    switches::DISABLE_SETUID_SANDBOX,
    switches::STANDARD_SCHEMES,
    switches::SECURE_SCHEMES,
    switches::BYPASS_CSP_SCHEMES,
    switches::CORS_SCHEMES,
    switches::FETCH_SCHEMES,
    switches::SERVICE_WORKER_SCHEMES,
];

#[derive(Debug)]
pub struct CoordinatorClient {
    program: PathBuf,
    locale: String,
    inherited: Vec<(String, String)>,
    child: ChildLaunchConfig,
    policy: SandboxPolicy,
    lifecycle: Lifecycle,
}

impl CoordinatorClient {
    pub fn new(flags: &InvocationFlags, policy: SandboxPolicy, child: ChildLaunchConfig) -> Self {
        let locale = resolve_locale(flags.switch_value(switches::LANG).unwrap_or_default());
        let inherited = INHERITED_SWITCHES
            .iter()
            .filter_map(|name| {
                flags
                    .switch_value(name)
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();

        Self {
            program: flags.program().to_path_buf(),
            locale: locale.to_string(),
            inherited,
            child,
            policy,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Policy resolved for the children of this coordinator
    pub fn policy(&self) -> SandboxPolicy {
        self.policy
    }

    pub fn child_config(&self) -> &ChildLaunchConfig {
        &self.child
    }

    /// Locale handed to children
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Argv for spawning a worker of `role`.
    ///
    /// Order: program, role, locale, inherited switches, then the switches
    /// appended by sandbox resolution.
    pub fn child_invocation(&self, role: &ProcessRole) -> Vec<String> {
        let mut argv = vec![self.program.to_string_lossy().into_owned()];
        if !role.is_coordinator() {
            argv.push(format_switch(switches::PROCESS_TYPE, role.identifier()));
        }
        argv.push(format_switch(switches::LANG, &self.locale));
        argv.extend(
            self.inherited
                .iter()
                .filter(|(name, _)| !self.child.contains(name))
                .map(|(name, value)| format_switch(name, value)),
        );
        argv.extend(self.child.to_args());

        debug!("Child invocation for {}: {:?}", role, argv);
        argv
    }
}

impl RoleBehavior for CoordinatorClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Coordinator
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::coordinator()
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

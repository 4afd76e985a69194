//! Side-effect free view of the decisions startup would make

use apphost_core::{classify, switches, InvocationFlags, Platform, ProcessRole};
use apphost_resources::{needs_resources, resolve_locale};
use apphost_sandbox::{resolve, SandboxPolicy};
use serde::Serialize;

use crate::client::{self, CapabilitySet, ClientKind};
use crate::relauncher;

/// Every decision for one invocation, without loading anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupReport {
    pub role: ProcessRole,
    pub platform: Platform,
    pub needs_resources: bool,
    /// Locale the bundle would load, when resources are needed
    pub locale: Option<String>,
    /// Absent for the relauncher, which never reaches sandbox setup
    pub sandbox_policy: Option<SandboxPolicy>,
    pub child_switches: Vec<String>,
    pub client: Option<ClientKind>,
    pub capabilities: Option<CapabilitySet>,
    pub pass_handle_channel: bool,
    pub delay_sandbox_initialization: bool,
}

/// Work out the startup decisions for `flags`
pub fn inspect(flags: &InvocationFlags, platform: Platform) -> StartupReport {
    let role = classify(flags);
    let needs = needs_resources(&role, platform);
    let locale = needs
        .then(|| resolve_locale(flags.switch_value(switches::LANG).unwrap_or_default()).to_string());

    let (sandbox_policy, child_switches) = if role.is_relauncher() {
        (None, Vec::new())
    } else if role.is_coordinator() {
        let resolution = resolve(flags, platform);
        (Some(resolution.policy), resolution.child.to_args())
    } else {
        (Some(SandboxPolicy::from_inherited(flags)), Vec::new())
    };

    let client = sandbox_policy.map(|policy| client::select(&role, policy));
    let capabilities = client.map(capabilities_of);

    StartupReport {
        pass_handle_channel: relauncher::should_pass_handle_channel(&role),
        delay_sandbox_initialization: relauncher::delay_sandbox_initialization(&role),
        role,
        platform,
        needs_resources: needs,
        locale,
        sandbox_policy,
        child_switches,
        client,
        capabilities,
    }
}

fn capabilities_of(kind: ClientKind) -> CapabilitySet {
    match kind {
        ClientKind::Coordinator => CapabilitySet::coordinator(),
        ClientKind::Renderer => CapabilitySet::renderer(),
        ClientKind::SandboxedRenderer => CapabilitySet::sandboxed_renderer(),
        ClientKind::Utility | ClientKind::Passthrough => CapabilitySet::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(args: &[&str], platform: Platform) -> StartupReport {
        let argv = std::iter::once("app").chain(args.iter().copied());
        inspect(&InvocationFlags::parse(argv, platform), platform)
    }

    #[test]
    fn coordinator_report() {
        let r = report(&[], Platform::Linux);
        assert_eq!(r.role, ProcessRole::Coordinator);
        assert!(!r.needs_resources);
        assert_eq!(r.locale, None);
        assert_eq!(r.sandbox_policy, Some(SandboxPolicy::NoSandbox));
        assert_eq!(
            r.child_switches,
            vec!["--no-sandbox", "--allow-file-access-from-files"]
        );
        assert_eq!(r.client, Some(ClientKind::Coordinator));
    }

    #[test]
    fn sandboxed_renderer_report() {
        let r = report(&["--type=renderer", "--enable-sandbox", "--lang=it"], Platform::Linux);
        assert!(r.needs_resources);
        assert_eq!(r.locale.as_deref(), Some("it"));
        assert_eq!(r.client, Some(ClientKind::SandboxedRenderer));
        assert!(r.child_switches.is_empty());
        assert!(!r.capabilities.unwrap().script_runtime);
    }

    #[test]
    fn relauncher_report_stops_at_dispatch() {
        let r = report(&["--type=relauncher"], Platform::MacOs);
        assert_eq!(r.sandbox_policy, None);
        assert_eq!(r.client, None);
        assert!(!r.pass_handle_channel);
        assert!(r.delay_sandbox_initialization);
    }

    #[test]
    fn capabilities_match_created_clients() {
        use crate::client::{create, ClientContext, RoleBehavior};

        let flags = InvocationFlags::parse(["app"], Platform::Linux);
        for role in [ProcessRole::Coordinator, ProcessRole::Renderer, ProcessRole::Utility] {
            for policy in [SandboxPolicy::Strict, SandboxPolicy::NoSandbox] {
                let created = create(&role, policy, ClientContext { flags: &flags, child: None });
                assert_eq!(capabilities_of(created.kind()), created.capabilities());
            }
        }
    }
}

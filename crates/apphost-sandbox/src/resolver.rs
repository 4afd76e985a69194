//! Coordinator-side sandbox resolution
//!
//! Runs once, in the coordinator, before any worker is spawned. The checks
//! are ordered and the first match wins: mixed beats strict beats the
//! default. Without an explicit request the default is `NoSandbox`, which
//! keeps the host compatible with its unsandboxed legacy mode; the embedded
//! scripting runtime needs broad filesystem and process access.

use apphost_core::{switches, InvocationFlags, Platform};
use log::{debug, info};
use serde::Serialize;

use crate::child::ChildLaunchConfig;
use crate::policy::SandboxPolicy;

/// Outcome of resolution: the policy and what children receive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SandboxResolution {
    pub policy: SandboxPolicy,
    pub child: ChildLaunchConfig,
}

/// Resolve the sandbox policy from the coordinator's own flags.
///
/// Never fails. The appended switches only affect children; the
/// coordinator itself is not sandboxed by them.
pub fn resolve(flags: &InvocationFlags, platform: Platform) -> SandboxResolution {
    let mut child = ChildLaunchConfig::builder();

    let policy = if flags.has_switch(switches::ENABLE_MIXED_SANDBOX) {
        SandboxPolicy::Mixed
    } else if flags.has_switch(switches::ENABLE_SANDBOX) {
        child = child.switch(switches::DISABLE_SETUID_SANDBOX);
        SandboxPolicy::Strict
    } else {
        child = child.switch(switches::NO_SANDBOX);
        SandboxPolicy::NoSandbox
    };

    // file:// documents may read other file:// documents.
    child = child.switch(switches::ALLOW_FILE_ACCESS_FROM_FILES);

    if platform == Platform::MacOs {
        child = child.switch(switches::ENABLE_AVFOUNDATION);
    }

    let child = child.build();
    info!("Sandbox policy resolved: {}", policy);
    debug!("Child switches: {:?}", child.to_args());

    SandboxResolution { policy, child }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_args(args: &[&str], platform: Platform) -> SandboxResolution {
        let argv = std::iter::once("app").chain(args.iter().copied());
        resolve(&InvocationFlags::parse(argv, platform), platform)
    }

    #[test]
    fn default_is_no_sandbox() {
        let r = resolve_args(&[], Platform::Linux);
        assert_eq!(r.policy, SandboxPolicy::NoSandbox);
        assert_eq!(
            r.child.to_args(),
            vec!["--no-sandbox", "--allow-file-access-from-files"]
        );
    }

    #[test]
    fn enable_sandbox_disables_setuid_helper() {
        let r = resolve_args(&["--enable-sandbox"], Platform::Linux);
        assert_eq!(r.policy, SandboxPolicy::Strict);
        assert!(r.child.contains(switches::DISABLE_SETUID_SANDBOX));
        assert!(!r.child.contains(switches::NO_SANDBOX));
    }

    #[test]
    fn mixed_leaves_sandbox_switches_alone() {
        let r = resolve_args(&["--enable-mixed-sandbox"], Platform::Linux);
        assert_eq!(r.policy, SandboxPolicy::Mixed);
        assert_eq!(r.child.to_args(), vec!["--allow-file-access-from-files"]);
    }

    #[test]
    fn mixed_wins_over_strict() {
        let r = resolve_args(&["--enable-sandbox", "--enable-mixed-sandbox"], Platform::Linux);
        assert_eq!(r.policy, SandboxPolicy::Mixed);
        assert!(!r.child.contains(switches::DISABLE_SETUID_SANDBOX));
    }

    #[test]
    fn macos_enables_avfoundation() {
        let r = resolve_args(&[], Platform::MacOs);
        assert_eq!(r.child.switches().last().unwrap().name, "enable-avfoundation");

        for platform in [Platform::Linux, Platform::Windows] {
            assert!(!resolve_args(&[], platform).child.contains("enable-avfoundation"));
        }
    }
}

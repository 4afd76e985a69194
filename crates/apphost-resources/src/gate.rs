//! Which roles must load the resource bundle before doing any work

use apphost_core::{Platform, ProcessRole};

/// Returns true if a process of this role needs the resource bundle loaded
/// during pre-sandbox startup.
///
/// The coordinator is never included: the host loads its bundle later with
/// the application locale.
pub fn needs_resources(role: &ProcessRole, platform: Platform) -> bool {
    match role {
        ProcessRole::Renderer | ProcessRole::Utility => true,
        // The zygote opens the resources for the renderers it forks.
        ProcessRole::ZygoteSpawner => platform == Platform::Linux,
        // Scrollbar images and sandbox profiles.
        ProcessRole::PluginWorker | ProcessRole::PluginBroker | ProcessRole::GpuWorker => {
            platform == Platform::MacOs
        }
        ProcessRole::Coordinator | ProcessRole::Relauncher | ProcessRole::OtherWorker(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_and_utility_everywhere() {
        for platform in Platform::all() {
            assert!(needs_resources(&ProcessRole::Renderer, platform));
            assert!(needs_resources(&ProcessRole::Utility, platform));
        }
    }

    #[test]
    fn coordinator_and_relauncher_never() {
        for platform in Platform::all() {
            assert!(!needs_resources(&ProcessRole::Coordinator, platform));
            assert!(!needs_resources(&ProcessRole::Relauncher, platform));
            assert!(!needs_resources(
                &ProcessRole::OtherWorker("network".to_string()),
                platform
            ));
        }
    }

    #[test]
    fn zygote_only_on_linux() {
        assert!(needs_resources(&ProcessRole::ZygoteSpawner, Platform::Linux));
        assert!(!needs_resources(&ProcessRole::ZygoteSpawner, Platform::MacOs));
        assert!(!needs_resources(&ProcessRole::ZygoteSpawner, Platform::Windows));
    }

    #[test]
    fn plugin_and_gpu_only_on_macos() {
        for role in [
            ProcessRole::PluginWorker,
            ProcessRole::PluginBroker,
            ProcessRole::GpuWorker,
        ] {
            assert!(needs_resources(&role, Platform::MacOs));
            assert!(!needs_resources(&role, Platform::Linux));
            assert!(!needs_resources(&role, Platform::Windows));
        }
    }
}

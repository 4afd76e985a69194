//! Relauncher dispatch
//!
//! The relauncher is a terminal role: it spawns a replacement coordinator
//! and exits. It is dispatched before any resource or sandbox work so it is
//! never subject to worker isolation itself.

use apphost_core::{InvocationFlags, ProcessRole};
use log::info;

/// What the relaunch routine receives
#[derive(Debug, Clone, Copy)]
pub struct MainParams<'a> {
    pub flags: &'a InvocationFlags,
}

/// The self-contained relaunch routine
pub trait Relauncher {
    /// Returns the process exit code
    fn relauncher_main(&mut self, params: MainParams<'_>) -> i32;
}

/// Run the relaunch routine when this process is the relauncher.
///
/// Returns `None` for every other role so normal startup continues.
pub fn run_process(
    role: &ProcessRole,
    params: MainParams<'_>,
    relauncher: &mut dyn Relauncher,
) -> Option<i32> {
    if !role.is_relauncher() {
        return None;
    }
    info!("Dispatching to relauncher");
    let code = relauncher.relauncher_main(params);
    info!("Relauncher finished with exit code {}", code);
    Some(code)
}

/// Whether the OS handle-passing channel is set up for this role
pub fn should_pass_handle_channel(role: &ProcessRole) -> bool {
    !role.is_relauncher()
}

/// The relauncher sets up its own isolation only after it has spawned its
/// replacement
pub fn delay_sandbox_initialization(role: &ProcessRole) -> bool {
    role.is_relauncher()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apphost_core::Platform;

    struct FixedRelauncher {
        calls: usize,
        code: i32,
    }

    impl Relauncher for FixedRelauncher {
        fn relauncher_main(&mut self, _params: MainParams<'_>) -> i32 {
            self.calls += 1;
            self.code
        }
    }

    #[test]
    fn relauncher_exit_code_is_returned_verbatim() {
        let flags = InvocationFlags::parse(["app", "--type=relauncher"], Platform::Linux);
        let mut relauncher = FixedRelauncher { calls: 0, code: 42 };

        let code = run_process(
            &ProcessRole::Relauncher,
            MainParams { flags: &flags },
            &mut relauncher,
        );
        assert_eq!(code, Some(42));
        assert_eq!(relauncher.calls, 1);
    }

    #[test]
    fn other_roles_fall_through() {
        let flags = InvocationFlags::parse(["app"], Platform::Linux);
        let mut relauncher = FixedRelauncher { calls: 0, code: 42 };

        for role in ProcessRole::known() {
            if role.is_relauncher() {
                continue;
            }
            assert_eq!(
                run_process(&role, MainParams { flags: &flags }, &mut relauncher),
                None
            );
        }
        assert_eq!(relauncher.calls, 0);
    }

    #[test]
    fn handle_channel_and_delay_are_inverse() {
        for role in ProcessRole::known() {
            assert_eq!(
                should_pass_handle_channel(&role),
                !delay_sandbox_initialization(&role)
            );
        }
        assert!(!should_pass_handle_channel(&ProcessRole::Relauncher));
        assert!(delay_sandbox_initialization(&ProcessRole::Relauncher));
        assert!(should_pass_handle_channel(&ProcessRole::Renderer));
    }
}

//! Diagnostic logging and stack dumping for the startup sequence

use std::io::Write;
use std::sync::Once;

use apphost_core::{switches, InvocationFlags};
use console::style;
use env_logger::{Builder, Env};
use log::{Level, LevelFilter};

/// What basic startup attaches, decided once from switches and environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsSettings {
    pub logging: bool,
    pub stack_dumping: bool,
}

impl DiagnosticsSettings {
    pub fn from_flags(flags: &InvocationFlags) -> Self {
        let env = flags.env();
        let logging = flags.has_switch(switches::ENABLE_LOGGING)
            || env.has_var(switches::env::ENABLE_LOGGING);

        let mut stack_dumping = env.has_var(switches::env::ENABLE_STACK_DUMPING);
        if cfg!(all(debug_assertions, target_os = "linux")) {
            stack_dumping = true;
        }
        // Dumping crashes on 32-bit ARM.
        if cfg!(all(target_arch = "arm", target_pointer_width = "32")) {
            stack_dumping = false;
        }

        Self {
            logging,
            stack_dumping,
        }
    }
}

/// Attach the logger, or silence logging entirely when not requested.
///
/// Lines carry the pid and a timestamp. `RUST_LOG` still filters when
/// logging is on.
pub fn init_logging(settings: &DiagnosticsSettings) {
    if !settings.logging {
        log::set_max_level(LevelFilter::Off);
        return;
    }

    let env = Env::default().filter_or("RUST_LOG", "info");
    let pid = std::process::id();

    let result = Builder::from_env(env)
        .format(move |buf, record| {
            let level = match record.level() {
                Level::Error => format!("{}", style("ERROR").red().bold()),
                Level::Warn => format!("{}", style("WARN ").yellow().bold()),
                Level::Info => format!("{}", style("INFO ").green()),
                Level::Debug => format!("{}", style("DEBUG").cyan()),
                Level::Trace => format!("{}", style("TRACE").dim()),
            };
            writeln!(
                buf,
                "[{}:{}] {} {}",
                pid,
                buf.timestamp_millis(),
                level,
                record.args()
            )
        })
        .try_init();

    // Already attached by an earlier startup in this process.
    if result.is_err() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Print a backtrace on panic, then defer to the previous hook.
pub fn enable_stack_dumping() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let backtrace = std::backtrace::Backtrace::force_capture();
            eprintln!("{} {}\n{}", style("panic:").red().bold(), info, backtrace);
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use apphost_core::{Environment, Platform};

    fn settings(args: &[&str], env: &[(&str, &str)]) -> DiagnosticsSettings {
        let argv = std::iter::once("app").chain(args.iter().copied());
        let flags = InvocationFlags::parse(argv, Platform::Linux)
            .with_env(Environment::from_pairs(env.iter().copied()));
        DiagnosticsSettings::from_flags(&flags)
    }

    #[test]
    fn logging_off_by_default() {
        assert!(!settings(&[], &[]).logging);
    }

    #[test]
    fn logging_switch_enables() {
        assert!(settings(&["--enable-logging"], &[]).logging);
    }

    #[test]
    fn logging_env_override_enables() {
        assert!(settings(&[], &[("APPHOST_ENABLE_LOGGING", "1")]).logging);
    }

    #[test]
    fn stack_dumping_env_override() {
        let s = settings(&[], &[("APPHOST_ENABLE_STACK_DUMPING", "")]);
        if cfg!(all(target_arch = "arm", target_pointer_width = "32")) {
            assert!(!s.stack_dumping);
        } else {
            assert!(s.stack_dumping);
        }
    }
}

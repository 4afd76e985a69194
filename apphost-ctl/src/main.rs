//! apphost-ctl - Run and inspect the apphost startup sequence

mod cli;
mod commands;
mod host;
mod relaunch;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{list_roles, print_report, program_name};
use console::style;
use host::ConsoleHost;
use relaunch::SpawnRelauncher;

use apphost::logging::{init_logging, DiagnosticsSettings};
use apphost::{
    exit_code, switches, Environment, InvocationFlags, MainDelegate, Platform, StartupConfig,
};

fn invocation(args: Vec<String>, platform: Platform) -> InvocationFlags {
    let argv = std::iter::once(program_name()).chain(args);
    InvocationFlags::parse(argv, platform).with_env(Environment::from_process())
}

fn launch_config(cli: &Cli) -> apphost::Result<StartupConfig> {
    let mut builder = StartupConfig::builder();
    if let Some(platform) = cli.platform {
        builder = builder.platform(platform.into());
    }
    if let Some(dir) = &cli.resource_dir {
        builder = builder.resource_dir(dir);
    }
    builder.build()
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("error:").red().bold(), e);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Launch { args } => {
            let config = launch_config(&cli).unwrap_or_else(|e| fail(e));
            let mut args = args.clone();
            if cli.verbose {
                args.insert(0, format!("--{}", switches::ENABLE_LOGGING));
            }

            let mut delegate = MainDelegate::new(invocation(args, config.platform), config);
            let code = exit_code(delegate.run(&mut SpawnRelauncher, &mut ConsoleHost));
            std::process::exit(code);
        }
        Commands::Inspect { args } => {
            init_logging(&DiagnosticsSettings {
                logging: cli.verbose,
                stack_dumping: false,
            });
            let platform = cli.platform.map(Platform::from).unwrap_or_default();
            if let Err(e) = print_report(&invocation(args.clone(), platform), platform) {
                fail(e);
            }
        }
        Commands::Roles => {
            init_logging(&DiagnosticsSettings {
                logging: cli.verbose,
                stack_dumping: false,
            });
            list_roles();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apphost::{MainParams, Relauncher};
    use commands::render_report;

    #[test]
    fn list_roles_runs() {
        list_roles();
    }

    #[test]
    fn cli_accepts_hyphen_args_after_subcommand() {
        let cli = Cli::parse_from([
            "apphost-ctl",
            "--platform",
            "macos",
            "inspect",
            "--type=renderer",
            "--enable-sandbox",
        ]);
        assert_eq!(cli.platform.map(Platform::from), Some(Platform::MacOs));
        match cli.command {
            Commands::Inspect { args } => {
                assert_eq!(args, vec!["--type=renderer", "--enable-sandbox"]);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn report_renders_as_json() {
        let flags = invocation(vec!["--type=gpu-process".to_string()], Platform::MacOs);
        let json: serde_json::Value =
            serde_json::from_str(&render_report(&flags, Platform::MacOs).unwrap()).unwrap();

        assert_eq!(json["role"]["kind"], "gpu_worker");
        assert_eq!(json["needs_resources"], true);
        assert_eq!(json["client"], "passthrough");
    }

    #[test]
    fn host_describes_renderer_policy_and_passthrough_role() {
        use apphost::client::{PassthroughClient, RendererClient, SandboxedRendererClient};
        use apphost::{ProcessRole, RoleClient, SandboxPolicy};

        let full = RoleClient::Renderer(RendererClient::new(SandboxPolicy::NoSandbox));
        assert_eq!(host::describe(&full), vec!["Renderer client", "Policy: no_sandbox"]);

        let isolated =
            RoleClient::SandboxedRenderer(SandboxedRendererClient::new(SandboxPolicy::Mixed));
        assert_eq!(host::describe(&isolated)[1], "Policy: mixed");

        let gpu = RoleClient::Passthrough(PassthroughClient::new(ProcessRole::GpuWorker));
        assert_eq!(host::describe(&gpu), vec!["Passthrough client", "Role: gpu-process"]);
    }

    #[test]
    fn host_run_returns_success() {
        use apphost::client::UtilityClient;
        use apphost::{ContentHost, RoleClient};

        let mut client = RoleClient::Utility(UtilityClient::new());
        assert_eq!(ConsoleHost.run(&mut client), 0);
    }

    #[test]
    fn relauncher_without_command_fails() {
        let flags = invocation(vec!["--type=relauncher".to_string()], Platform::Linux);
        assert_eq!(SpawnRelauncher.relauncher_main(MainParams { flags: &flags }), 1);
    }

    #[test]
    fn launch_config_uses_resource_dir() {
        let cli = Cli::parse_from(["apphost-ctl", "--resource-dir", "/srv/packs", "launch"]);
        let config = launch_config(&cli).unwrap();
        assert_eq!(
            config.resource_dir.as_deref(),
            Some(std::path::Path::new("/srv/packs"))
        );
        assert_eq!(config.platform, Platform::current());
    }

    #[test]
    fn launch_config_honors_platform() {
        let cli = Cli::parse_from([
            "apphost-ctl",
            "--platform",
            "windows",
            "--resource-dir",
            "/srv/packs",
            "launch",
            "--type=renderer",
        ]);
        let config = launch_config(&cli).unwrap();
        assert_eq!(config.platform, Platform::Windows);
    }
}

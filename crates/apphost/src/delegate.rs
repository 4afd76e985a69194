//! Main delegate: the startup sequence of every process
//!
//! Phases run strictly in order on the initial thread:
//! basic startup, relauncher dispatch, pre-sandbox startup (resources, then
//! sandbox policy), role client creation, then the host's run loop.

use apphost_core::{classify, switches, InvocationFlags, ProcessRole, Result};
use apphost_resources::{needs_resources, BundleState, ResourceBundle};
use apphost_sandbox::{resolve, ChildLaunchConfig, SandboxPolicy};
use log::{error, info};
use serde::Serialize;

use crate::client::{self, ClientContext, ContentHost, RoleClient};
use crate::config::StartupConfig;
use crate::content_client::ContentClient;
use crate::logging::{enable_stack_dumping, init_logging, DiagnosticsSettings};
use crate::relauncher::{self, MainParams, Relauncher};

/// Exit status of a process whose startup failed fatally
pub const FATAL_STARTUP_EXIT_CODE: i32 = 1;

/// Phases the delegate has run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupPhase {
    BasicStartup,
    RelauncherDispatch,
    ResourceLoad,
    SandboxResolution,
    ClientCreated,
    HostRun,
}

pub struct MainDelegate {
    config: StartupConfig,
    flags: InvocationFlags,
    role: ProcessRole,
    bundle: ResourceBundle,
    content_client: Option<ContentClient>,
    policy: Option<SandboxPolicy>,
    child_config: Option<ChildLaunchConfig>,
    client: Option<RoleClient>,
    phases: Vec<StartupPhase>,
}

impl MainDelegate {
    /// Classify the process; nothing else happens until the phases run
    pub fn new(flags: InvocationFlags, config: StartupConfig) -> Self {
        let role = classify(&flags);
        Self {
            config,
            flags,
            role,
            bundle: ResourceBundle::new(),
            content_client: None,
            policy: None,
            child_config: None,
            client: None,
            phases: Vec::new(),
        }
    }

    pub fn role(&self) -> &ProcessRole {
        &self.role
    }

    pub fn flags(&self) -> &InvocationFlags {
        &self.flags
    }

    pub fn bundle(&self) -> &ResourceBundle {
        &self.bundle
    }

    pub fn content_client(&self) -> Option<&ContentClient> {
        self.content_client.as_ref()
    }

    pub fn sandbox_policy(&self) -> Option<SandboxPolicy> {
        self.policy
    }

    /// Switches for children; only the coordinator has them
    pub fn child_config(&self) -> Option<&ChildLaunchConfig> {
        self.child_config.as_ref()
    }

    pub fn client(&self) -> Option<&RoleClient> {
        self.client.as_ref()
    }

    pub fn phases(&self) -> &[StartupPhase] {
        &self.phases
    }

    pub fn should_pass_handle_channel(&self) -> bool {
        relauncher::should_pass_handle_channel(&self.role)
    }

    pub fn delay_sandbox_initialization(&self) -> bool {
        relauncher::delay_sandbox_initialization(&self.role)
    }

    /// Attach diagnostics and register the content client
    pub fn basic_startup_complete(&mut self) {
        self.phases.push(StartupPhase::BasicStartup);
        let settings = DiagnosticsSettings::from_flags(&self.flags);

        // The console returns immediately; keep output off the prompt line.
        #[cfg(windows)]
        {
            if self.role.is_coordinator() {
                println!();
            }
        }

        init_logging(&settings);
        if settings.stack_dumping {
            enable_stack_dumping();
        }

        let content_client = ContentClient::new(
            &self.config.product_name,
            &self.config.product_version,
            &self.flags,
        );
        info!(
            "Starting {} as {} on {}",
            content_client.product(),
            self.role,
            self.config.platform.as_str()
        );
        self.content_client = Some(content_client);
    }

    /// Hand the process to the relaunch routine if it is the relauncher
    pub fn run_process(&mut self, relauncher: &mut dyn Relauncher) -> Option<i32> {
        if self.role.is_relauncher() {
            self.phases.push(StartupPhase::RelauncherDispatch);
        }
        relauncher::run_process(&self.role, MainParams { flags: &self.flags }, relauncher)
    }

    /// Load resources when the role needs them, then settle the sandbox
    /// policy. A resource error must abort startup.
    pub fn pre_sandbox_startup(&mut self) -> Result<()> {
        if needs_resources(&self.role, self.config.platform) {
            let locale = self
                .flags
                .switch_value(switches::LANG)
                .unwrap_or_default()
                .to_string();
            self.load_resources(&locale)?;
        }

        self.resolve_sandbox();
        Ok(())
    }

    /// Load (or reload) the resource bundle for `locale`
    pub fn load_resources(&mut self, locale: &str) -> Result<BundleState> {
        self.phases.push(StartupPhase::ResourceLoad);
        let layout = self.config.resource_layout()?;
        self.bundle.load(locale, &layout)
    }

    /// Policy of this process, settled on first call.
    ///
    /// The coordinator runs the resolver and records the child switches;
    /// workers read what their coordinator appended.
    pub fn resolve_sandbox(&mut self) -> SandboxPolicy {
        if let Some(policy) = self.policy {
            return policy;
        }

        let policy = if self.role.is_coordinator() {
            self.phases.push(StartupPhase::SandboxResolution);
            let resolution = resolve(&self.flags, self.config.platform);
            self.child_config = Some(resolution.child);
            resolution.policy
        } else {
            SandboxPolicy::from_inherited(&self.flags)
        };

        self.policy = Some(policy);
        policy
    }

    /// Create the process's single role client.
    ///
    /// Calling this twice is a contract violation.
    pub fn create_role_client(&mut self) -> &mut RoleClient {
        let client = self.build_client();
        self.client.insert(client)
    }

    fn build_client(&mut self) -> RoleClient {
        debug_assert!(self.client.is_none(), "role client created twice");
        let policy = self.resolve_sandbox();
        let client = client::create(
            &self.role,
            policy,
            ClientContext {
                flags: &self.flags,
                child: self.child_config.as_ref(),
            },
        );
        self.phases.push(StartupPhase::ClientCreated);
        client
    }

    /// Run the whole startup sequence and the host's run loop.
    ///
    /// Returns the process exit code, or the fatal startup error.
    pub fn run(
        &mut self,
        relauncher: &mut dyn Relauncher,
        host: &mut dyn ContentHost,
    ) -> Result<i32> {
        self.basic_startup_complete();

        if let Some(code) = self.run_process(relauncher) {
            return Ok(code);
        }

        self.pre_sandbox_startup()?;

        let mut client = self.build_client();
        self.phases.push(StartupPhase::HostRun);
        let result = client.run(host);
        self.client = Some(client);
        result
    }
}

/// Map a startup outcome to the process exit code
pub fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal startup error: {}", e);
            FATAL_STARTUP_EXIT_CODE
        }
    }
}

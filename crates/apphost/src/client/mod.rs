//! Role client factory
//!
//! Exactly one client is created per process, after its sandbox policy is
//! known, and owned by the delegate for the rest of the process lifetime.

pub mod capabilities;
pub mod coordinator;
pub mod renderer;
pub mod utility;

use apphost_core::{InvocationFlags, ProcessRole, Result};
use apphost_sandbox::{ChildLaunchConfig, SandboxPolicy};
use log::debug;
use serde::Serialize;

pub use capabilities::CapabilitySet;
pub use coordinator::CoordinatorClient;
pub use renderer::{RendererClient, SandboxedRendererClient};
pub use utility::{PassthroughClient, UtilityClient};

/// Which behavior object drives the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    Coordinator,
    Renderer,
    SandboxedRenderer,
    Utility,
    /// Roles the embedding framework's defaults handle
    Passthrough,
}

/// Lifecycle of a role client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Running,
    ShutDown,
}

impl Lifecycle {
    fn start(&mut self, kind: ClientKind) {
        debug_assert_eq!(*self, Lifecycle::Created, "{:?} initialized twice", kind);
        debug!("{:?} client initialized", kind);
        *self = Lifecycle::Running;
    }

    fn stop(&mut self, kind: ClientKind) {
        if *self == Lifecycle::Running {
            debug!("{:?} client shut down", kind);
        }
        *self = Lifecycle::ShutDown;
    }
}

/// Minimal contract every role client satisfies
pub trait RoleBehavior {
    fn kind(&self) -> ClientKind;
    fn capabilities(&self) -> CapabilitySet;
    fn lifecycle(&self) -> Lifecycle;
    fn initialize(&mut self) -> Result<()>;
    fn shutdown(&mut self);
}

/// The embedding framework's run loop for a process
pub trait ContentHost {
    /// Run the process with its client; the result is the exit code
    fn run(&mut self, client: &mut RoleClient) -> i32;
}

/// Inputs a client may capture at creation
#[derive(Debug, Clone, Copy)]
pub struct ClientContext<'a> {
    pub flags: &'a InvocationFlags,
    /// Present only in the coordinator
    pub child: Option<&'a ChildLaunchConfig>,
}

/// Decide the client variant. The renderer choice depends on the policy
/// alone.
pub fn select(role: &ProcessRole, policy: SandboxPolicy) -> ClientKind {
    match role {
        ProcessRole::Coordinator => ClientKind::Coordinator,
        ProcessRole::Renderer if policy.isolates_renderer() => ClientKind::SandboxedRenderer,
        ProcessRole::Renderer => ClientKind::Renderer,
        ProcessRole::Utility => ClientKind::Utility,
        ProcessRole::GpuWorker
        | ProcessRole::PluginWorker
        | ProcessRole::PluginBroker
        | ProcessRole::ZygoteSpawner
        | ProcessRole::Relauncher
        | ProcessRole::OtherWorker(_) => ClientKind::Passthrough,
    }
}

/// Construct the client for a classified process
pub fn create(role: &ProcessRole, policy: SandboxPolicy, ctx: ClientContext<'_>) -> RoleClient {
    let kind = select(role, policy);
    debug!("Creating {:?} client for role {}", kind, role);

    match kind {
        ClientKind::Coordinator => RoleClient::Coordinator(CoordinatorClient::new(
            ctx.flags,
            policy,
            ctx.child.cloned().unwrap_or_default(),
        )),
        ClientKind::Renderer => RoleClient::Renderer(RendererClient::new(policy)),
        ClientKind::SandboxedRenderer => {
            RoleClient::SandboxedRenderer(SandboxedRendererClient::new(policy))
        }
        ClientKind::Utility => RoleClient::Utility(UtilityClient::new()),
        ClientKind::Passthrough => RoleClient::Passthrough(PassthroughClient::new(role.clone())),
    }
}

/// The single behavior object of a process
#[derive(Debug)]
pub enum RoleClient {
    Coordinator(CoordinatorClient),
    Renderer(RendererClient),
    SandboxedRenderer(SandboxedRendererClient),
    Utility(UtilityClient),
    Passthrough(PassthroughClient),
}

impl RoleClient {
    fn behavior(&self) -> &dyn RoleBehavior {
        match self {
            RoleClient::Coordinator(c) => c,
            RoleClient::Renderer(c) => c,
            RoleClient::SandboxedRenderer(c) => c,
            RoleClient::Utility(c) => c,
            RoleClient::Passthrough(c) => c,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn RoleBehavior {
        match self {
            RoleClient::Coordinator(c) => c,
            RoleClient::Renderer(c) => c,
            RoleClient::SandboxedRenderer(c) => c,
            RoleClient::Utility(c) => c,
            RoleClient::Passthrough(c) => c,
        }
    }

    /// Whether the client may parse externally supplied content now
    pub fn accepts_content(&self) -> bool {
        self.capabilities().hosts_content && self.lifecycle() == Lifecycle::Running
    }

    pub fn as_coordinator(&self) -> Option<&CoordinatorClient> {
        match self {
            RoleClient::Coordinator(c) => Some(c),
            _ => None,
        }
    }

    /// Initialize, hand the process to the host, then shut down
    pub fn run(&mut self, host: &mut dyn ContentHost) -> Result<i32> {
        self.initialize()?;
        let code = host.run(self);
        self.shutdown();
        Ok(code)
    }
}

impl RoleBehavior for RoleClient {
    fn kind(&self) -> ClientKind {
        self.behavior().kind()
    }

    fn capabilities(&self) -> CapabilitySet {
        self.behavior().capabilities()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.behavior().lifecycle()
    }

    fn initialize(&mut self) -> Result<()> {
        self.behavior_mut().initialize()
    }

    fn shutdown(&mut self) {
        self.behavior_mut().shutdown()
    }
}

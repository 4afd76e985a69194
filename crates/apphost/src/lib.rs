//! apphost: startup decision layer of a multi-process application host
//!
//! Every process of the host runs the same startup sequence once. It decides
//! what role the process plays, whether it loads the resource bundle, which
//! sandbox policy applies, and which role client drives the rest of its life.
//!
//! # Sandbox defaults
//!
//! - **Mixed** (`--enable-mixed-sandbox`): the caller manages isolation.
//! - **Strict** (`--enable-sandbox`): full isolation, setuid helper disabled.
//! - **NoSandbox** (default): children run unsandboxed so the embedded
//!   scripting runtime keeps its filesystem and process access.
//!
//! # Example
//!
//! ```ignore
//! use apphost::{exit_code, InvocationFlags, MainDelegate, StartupConfig};
//!
//! let mut delegate = MainDelegate::new(InvocationFlags::from_process(), StartupConfig::default());
//! let code = exit_code(delegate.run(&mut relauncher, &mut host));
//! std::process::exit(code);
//! ```

pub mod client;
pub mod config;
pub mod content_client;
pub mod delegate;
pub mod logging;
pub mod relauncher;
pub mod report;

// Re-export sub-crate types for convenience
pub use apphost_core::{
    self as core, classify, switches, Environment, InvocationFlags, Platform, ProcessRole, Result,
    StartupError,
};
pub use apphost_resources::{needs_resources, BundleState, ResourceBundle, ResourceLayout};
pub use apphost_sandbox::{resolve, ChildLaunchConfig, SandboxPolicy, SandboxResolution};

pub use client::{
    CapabilitySet, ClientKind, ContentHost, Lifecycle, RoleBehavior, RoleClient,
};
pub use config::{StartupConfig, StartupConfigBuilder};
pub use content_client::{ContentClient, SchemeRegistry};
pub use delegate::{exit_code, MainDelegate, StartupPhase, FATAL_STARTUP_EXIT_CODE};
pub use relauncher::{MainParams, Relauncher};
pub use report::{inspect, StartupReport};

//! apphost-sandbox: sandbox policy resolution
//!
//! The coordinator resolves the policy once and records the switches its
//! children must receive in an immutable [`ChildLaunchConfig`]. Workers read
//! their policy back from those inherited switches.

pub mod child;
pub mod policy;
pub mod resolver;

pub use child::{AppendedSwitch, ChildLaunchConfig, ChildLaunchConfigBuilder};
pub use policy::SandboxPolicy;
pub use resolver::{resolve, SandboxResolution};

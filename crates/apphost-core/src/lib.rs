//! apphost-core: shared types for the apphost startup layer
//!
//! This crate provides the foundations used by every other apphost crate:
//! - Error types and Result alias
//! - Switch and environment variable names
//! - Invocation flag parsing and the environment view
//! - Process roles and classification
//! - Platform families

pub mod error;
pub mod flags;
pub mod platform;
pub mod role;
pub mod switches;

pub use error::{Result, StartupError};
pub use flags::{Environment, InvocationFlags};
pub use platform::Platform;
pub use role::{classify, ProcessRole};

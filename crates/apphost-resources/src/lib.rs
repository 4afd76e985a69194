//! apphost-resources: the resource gate
//!
//! Decides which roles must load localized and shared resources before
//! doing any work, and loads them exactly once into a process-scoped
//! [`ResourceBundle`].

pub mod bundle;
pub mod gate;
pub mod layout;
pub mod pack;

pub use bundle::{BundleState, ResourceBundle};
pub use gate::needs_resources;
pub use layout::{resolve_locale, ResourceLayout, DEFAULT_LOCALE};
pub use pack::{encode_v5, DataPack, TextEncoding};

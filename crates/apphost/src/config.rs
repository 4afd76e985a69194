//! Startup configuration

use std::path::{Path, PathBuf};

use apphost_core::{Platform, Result, StartupError};
use apphost_resources::ResourceLayout;

/// Host-level settings the startup sequence needs besides the invocation
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Platform decisions are evaluated for
    pub platform: Platform,
    /// Directory holding the packs; derived from the executable when unset
    pub resource_dir: Option<PathBuf>,
    /// Framework bundle name on macOS
    pub framework_name: String,
    pub product_name: String,
    pub product_version: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            resource_dir: None,
            framework_name: "AppHost Framework".to_string(),
            product_name: "AppHost".to_string(),
            product_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl StartupConfig {
    pub fn builder() -> StartupConfigBuilder {
        StartupConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.product_name.trim().is_empty() {
            return Err(StartupError::InvalidConfig(
                "Product name cannot be empty".to_string(),
            ));
        }
        if self.platform == Platform::MacOs
            && self.resource_dir.is_none()
            && self.framework_name.trim().is_empty()
        {
            return Err(StartupError::InvalidConfig(
                "Framework name is required to locate macOS resources".to_string(),
            ));
        }
        Ok(())
    }

    /// Where this process finds its packs
    pub fn resource_layout(&self) -> Result<ResourceLayout> {
        match &self.resource_dir {
            Some(dir) => Ok(ResourceLayout::new(dir)),
            None => ResourceLayout::current(self.platform, &self.framework_name),
        }
    }
}

/// Builder pattern for [`StartupConfig`]
#[derive(Debug, Default)]
pub struct StartupConfigBuilder {
    config: StartupConfig,
}

impl StartupConfigBuilder {
    pub fn platform(mut self, platform: Platform) -> Self {
        self.config.platform = platform;
        self
    }

    /// Use a fixed resource directory instead of the executable's
    pub fn resource_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.config.resource_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn framework_name(mut self, name: &str) -> Self {
        self.config.framework_name = name.to_string();
        self
    }

    pub fn product(mut self, name: &str, version: &str) -> Self {
        self.config.product_name = name.to_string();
        self.config.product_version = version.to_string();
        self
    }

    pub fn build(self) -> Result<StartupConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

//! On-disk layout of resource packs

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use apphost_core::{Platform, Result, StartupError};
use log::warn;

pub const LOCALES_DIR: &str = "locales";
pub const COMMON_PACK: &str = "resources.pak";
#[cfg(feature = "pdf-viewer")]
pub const PDF_VIEWER_PACK: &str = "pdf_viewer_resources.pak";
pub const PACK_EXTENSION: &str = "pak";

/// Locale used when none (or an unusable one) was passed in
pub const DEFAULT_LOCALE: &str = "en-US";

/// Where the packs of this installation live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    base: PathBuf,
}

impl ResourceLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Layout for the running executable
    pub fn current(platform: Platform, framework_name: &str) -> Result<Self> {
        let exe = std::env::current_exe()?;
        Self::for_executable(&exe, platform, framework_name)
    }

    /// Resolve the base directory from an executable path.
    ///
    /// On macOS packs live in the framework bundle of the outermost `.app`;
    /// elsewhere next to the executable.
    pub fn for_executable(exe: &Path, platform: Platform, framework_name: &str) -> Result<Self> {
        match platform {
            Platform::MacOs => {
                let outer = exe
                    .ancestors()
                    .filter(|p| p.extension() == Some(OsStr::new("app")))
                    .last()
                    .ok_or_else(|| {
                        StartupError::ResourceDir(format!(
                            "{} is not inside an application bundle",
                            exe.display()
                        ))
                    })?;
                Ok(Self::new(
                    outer
                        .join("Contents")
                        .join("Frameworks")
                        .join(format!("{}.framework", framework_name))
                        .join("Resources"),
                ))
            }
            Platform::Linux | Platform::Windows => {
                let dir = exe.parent().ok_or_else(|| {
                    StartupError::ResourceDir(format!("{} has no parent directory", exe.display()))
                })?;
                Ok(Self::new(dir))
            }
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn locale_pack(&self, locale: &str) -> PathBuf {
        self.base
            .join(LOCALES_DIR)
            .join(format!("{}.{}", locale, PACK_EXTENSION))
    }

    /// Locale independent packs, in attach order
    pub fn common_packs(&self) -> Vec<PathBuf> {
        #[allow(unused_mut)]
        let mut packs = vec![self.base.join(COMMON_PACK)];
        #[cfg(feature = "pdf-viewer")]
        packs.push(self.base.join(PDF_VIEWER_PACK));
        packs
    }
}

/// Locale to load for a requested value.
///
/// The value comes from a switch, so anything that could escape the locales
/// directory falls back to the default.
pub fn resolve_locale(requested: &str) -> &str {
    if requested.is_empty() {
        return DEFAULT_LOCALE;
    }
    let valid = requested
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        requested
    } else {
        warn!(
            "Ignoring invalid locale {:?}, using {}",
            requested, DEFAULT_LOCALE
        );
        DEFAULT_LOCALE
    }
}

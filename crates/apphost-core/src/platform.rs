//! Target platform families that change startup decisions

use serde::Serialize;

/// Platform family a decision is evaluated for.
///
/// Decisions take the platform as an explicit input so every branch can be
/// exercised from a single test host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// POSIX systems other than macOS
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Platform this binary was compiled for
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }

    pub fn all() -> [Platform; 3] {
        [Platform::Linux, Platform::MacOs, Platform::Windows]
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_cfg() {
        let p = Platform::current();
        #[cfg(target_os = "linux")]
        assert_eq!(p, Platform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(p, Platform::MacOs);
        #[cfg(windows)]
        assert_eq!(p, Platform::Windows);
        let _ = p;
    }

    #[test]
    fn names_are_distinct() {
        let names: Vec<_> = Platform::all().iter().map(Platform::as_str).collect();
        assert_eq!(names, vec!["linux", "macos", "windows"]);
    }
}

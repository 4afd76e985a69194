//! Invocation flags and the environment view of the current process
//!
//! Parsing follows the embedding framework's command line rules so that
//! children spawned by the coordinator read the exact switches it wrote.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Ends switch parsing; everything after it is positional
pub const SWITCH_TERMINATOR: &str = "--";
const SWITCH_VALUE_SEPARATOR: char = '=';

/// Read-only snapshot of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Variables that are not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Presence test; an empty value still counts as set
    pub fn has_var(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Switches, positional arguments and environment this process was started
/// with. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationFlags {
    program: PathBuf,
    switches: BTreeMap<String, String>,
    positional: Vec<String>,
    env: Environment,
    platform: Platform,
}

impl InvocationFlags {
    /// Parse an argv whose first element is the program path.
    pub fn parse<I, S>(argv: I, platform: Platform) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = argv.into_iter().map(Into::into);
        let program = PathBuf::from(args.next().unwrap_or_default());

        let mut flags = Self {
            program,
            switches: BTreeMap::new(),
            positional: Vec::new(),
            env: Environment::default(),
            platform,
        };

        let mut parse_switches = true;
        for arg in args {
            if parse_switches && arg == SWITCH_TERMINATOR {
                parse_switches = false;
                continue;
            }
            if parse_switches {
                if let Some((name, value)) = split_switch(&arg, platform) {
                    flags.switches.insert(name, value);
                    continue;
                }
            }
            flags.positional.push(arg);
        }

        flags
    }

    /// Parse the arguments of the running process
    pub fn from_process() -> Self {
        let argv: Vec<String> = std::env::args_os()
            .map(OsString::into_string)
            .map(|a| a.unwrap_or_else(|raw| raw.to_string_lossy().into_owned()))
            .collect();
        Self::parse(argv, Platform::current()).with_env(Environment::from_process())
    }

    /// Attach the environment view
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn has_switch(&self, name: &str) -> bool {
        self.switches.contains_key(&self.normalize(name))
    }

    /// Value of a switch; boolean switches report the empty string
    pub fn switch_value(&self, name: &str) -> Option<&str> {
        self.switches.get(&self.normalize(name)).map(String::as_str)
    }

    /// Switches in name order
    pub fn switches(&self) -> impl Iterator<Item = (&str, &str)> {
        self.switches.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    fn normalize(&self, name: &str) -> String {
        normalize_name(name, self.platform)
    }
}

/// Render a switch back into its argv form
pub fn format_switch(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("--{}", name)
    } else {
        format!("--{}{}{}", name, SWITCH_VALUE_SEPARATOR, value)
    }
}

fn switch_prefix_len(arg: &str, platform: Platform) -> usize {
    if arg.starts_with("--") {
        2
    } else if arg.starts_with('-') || (platform == Platform::Windows && arg.starts_with('/')) {
        1
    } else {
        0
    }
}

fn split_switch(arg: &str, platform: Platform) -> Option<(String, String)> {
    let prefix = switch_prefix_len(arg, platform);
    if prefix == 0 || arg.len() == prefix {
        return None;
    }

    let body = &arg[prefix..];
    let (name, value) = match body.split_once(SWITCH_VALUE_SEPARATOR) {
        Some((name, value)) => (name, value),
        None => (body, ""),
    };
    if name.is_empty() {
        return None;
    }

    Some((normalize_name(name, platform), value.to_string()))
}

fn normalize_name(name: &str, platform: Platform) -> String {
    if platform == Platform::Windows {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}

//! Switches the coordinator propagates to the children it spawns

use apphost_core::flags::format_switch;
use serde::Serialize;

/// A switch appended for children; `value` is empty for boolean switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendedSwitch {
    pub name: String,
    pub value: String,
}

impl AppendedSwitch {
    pub fn to_arg(&self) -> String {
        format_switch(&self.name, &self.value)
    }
}

/// Immutable set of switches every spawned child receives in addition to
/// what it inherits. Built once, at the end of sandbox resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChildLaunchConfig {
    switches: Vec<AppendedSwitch>,
}

impl ChildLaunchConfig {
    pub fn builder() -> ChildLaunchConfigBuilder {
        ChildLaunchConfigBuilder::default()
    }

    /// Appended switches in append order
    pub fn switches(&self) -> &[AppendedSwitch] {
        &self.switches
    }

    pub fn contains(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s.name == name)
    }

    /// Argv fragments, in append order
    pub fn to_args(&self) -> Vec<String> {
        self.switches.iter().map(AppendedSwitch::to_arg).collect()
    }
}

/// Append-only builder for [`ChildLaunchConfig`]
#[derive(Debug, Default)]
pub struct ChildLaunchConfigBuilder {
    switches: Vec<AppendedSwitch>,
}

impl ChildLaunchConfigBuilder {
    /// Append a boolean switch
    pub fn switch(self, name: &str) -> Self {
        self.switch_with_value(name, "")
    }

    /// Append a switch with a value. A name already appended is kept as is.
    pub fn switch_with_value(mut self, name: &str, value: &str) -> Self {
        if !self.switches.iter().any(|s| s.name == name) {
            self.switches.push(AppendedSwitch {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        self
    }

    pub fn build(self) -> ChildLaunchConfig {
        ChildLaunchConfig {
            switches: self.switches,
        }
    }
}

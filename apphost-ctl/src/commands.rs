use std::path::PathBuf;

use apphost::{
    inspect, needs_resources, InvocationFlags, Platform, ProcessRole, Result, StartupError,
};
use log::info;

pub fn list_roles() {
    info!("Listing recognized process roles");
    println!("Recognized process roles:\n");

    for role in ProcessRole::known() {
        let identifier = if role.is_coordinator() {
            "(none)"
        } else {
            role.identifier()
        };
        let platforms: Vec<&str> = Platform::all()
            .into_iter()
            .filter(|platform| needs_resources(&role, *platform))
            .map(|platform| platform.as_str())
            .collect();

        println!("  {:14} - {:?}", identifier, role);
        if platforms.is_empty() {
            println!("                   resources: never");
        } else {
            println!("                   resources: {}", platforms.join(", "));
        }
    }

    println!();
    println!("Any other --type value runs as a generic worker");
}

/// Render the startup decisions for `flags` as pretty JSON
pub fn render_report(flags: &InvocationFlags, platform: Platform) -> Result<String> {
    let report = inspect(flags, platform);
    serde_json::to_string_pretty(&report)
        .map_err(|e| StartupError::InvalidConfig(format!("Cannot render report: {}", e)))
}

pub fn print_report(flags: &InvocationFlags, platform: Platform) -> Result<()> {
    info!("Inspecting invocation for {}", platform.as_str());
    println!("{}", render_report(flags, platform)?);
    Ok(())
}

/// Program recorded as argv[0] of the inspected or launched invocation
pub fn program_name() -> String {
    std::env::current_exe()
        .unwrap_or_else(|_| PathBuf::from("apphost-ctl"))
        .to_string_lossy()
        .into_owned()
}

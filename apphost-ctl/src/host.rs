//! Console host: reports the process it was handed and returns

use apphost::{ContentHost, ProcessRole, RoleBehavior, RoleClient};
use console::style;
use log::debug;

/// Child roles the coordinator previews launch lines for
const PREVIEW_ROLES: [ProcessRole; 2] = [ProcessRole::Renderer, ProcessRole::Utility];

pub struct ConsoleHost;

/// Lines describing what drives the process
pub fn describe(client: &RoleClient) -> Vec<String> {
    let mut lines = vec![format!("{:?} client", client.kind())];

    match client {
        RoleClient::Coordinator(coordinator) => {
            lines.push(format!("Child policy: {}", coordinator.policy()));
            for role in PREVIEW_ROLES.iter() {
                debug!("Prepared launch line for {}", role);
                lines.push(format!("  {}", coordinator.child_invocation(role).join(" ")));
            }
        }
        RoleClient::Renderer(renderer) => {
            lines.push(format!("Policy: {}", renderer.policy()));
        }
        RoleClient::SandboxedRenderer(renderer) => {
            lines.push(format!("Policy: {}", renderer.policy()));
        }
        RoleClient::Passthrough(passthrough) => {
            lines.push(format!("Role: {}", passthrough.role()));
        }
        RoleClient::Utility(_) => {}
    }
    lines
}

impl ContentHost for ConsoleHost {
    fn run(&mut self, client: &mut RoleClient) -> i32 {
        let lines = describe(client);
        if let Some((headline, rest)) = lines.split_first() {
            println!("{} {}", style("Running").green().bold(), headline);
            for line in rest {
                println!("{}", line);
            }
        }
        println!("{}", client.capabilities().summary());
        0
    }
}

//! Sandbox decision table over every combination of the two request switches

use apphost_core::{InvocationFlags, Platform};
use apphost_sandbox::{resolve, SandboxPolicy};
use pretty_assertions::assert_eq;

fn flags(mixed: bool, sandbox: bool) -> InvocationFlags {
    let mut argv = vec!["/opt/app/app"];
    if mixed {
        argv.push("--enable-mixed-sandbox");
    }
    if sandbox {
        argv.push("--enable-sandbox");
    }
    InvocationFlags::parse(argv, Platform::Linux)
}

#[test]
fn mixed_beats_strict_beats_default() {
    let cases = [
        (false, false, SandboxPolicy::NoSandbox, Some("no-sandbox")),
        (false, true, SandboxPolicy::Strict, Some("disable-setuid-sandbox")),
        (true, false, SandboxPolicy::Mixed, None),
        (true, true, SandboxPolicy::Mixed, None),
    ];

    for (mixed, sandbox, policy, marker) in cases {
        let resolution = resolve(&flags(mixed, sandbox), Platform::Linux);
        assert_eq!(resolution.policy, policy, "mixed={} sandbox={}", mixed, sandbox);

        let mut expected = Vec::new();
        if let Some(marker) = marker {
            expected.push(format!("--{}", marker));
        }
        expected.push("--allow-file-access-from-files".to_string());
        assert_eq!(resolution.child.to_args(), expected);
    }
}

#[test]
fn resolution_is_deterministic() {
    let f = flags(false, true);
    assert_eq!(resolve(&f, Platform::MacOs), resolve(&f, Platform::MacOs));
}

#[test]
fn resolution_snapshot() {
    let resolution = resolve(&flags(false, false), Platform::MacOs);
    let json = serde_json::to_value(&resolution).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "policy": "no_sandbox",
            "child": {
                "switches": [
                    { "name": "no-sandbox", "value": "" },
                    { "name": "allow-file-access-from-files", "value": "" },
                    { "name": "enable-avfoundation", "value": "" }
                ]
            }
        })
    );
}

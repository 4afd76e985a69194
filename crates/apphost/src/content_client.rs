//! Content client registered with the embedding framework during basic
//! startup

use apphost_core::{switches, InvocationFlags};
use serde::Serialize;

/// Custom URL schemes, grouped by the privileges they are registered with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemeRegistry {
    pub standard: Vec<String>,
    pub secure: Vec<String>,
    pub bypass_csp: Vec<String>,
    pub cors: Vec<String>,
    pub fetch: Vec<String>,
    pub service_worker: Vec<String>,
}

impl SchemeRegistry {
    pub fn from_flags(flags: &InvocationFlags) -> Self {
        let list = |name: &str| split_schemes(flags.switch_value(name).unwrap_or_default());
        Self {
            standard: list(switches::STANDARD_SCHEMES),
            secure: list(switches::SECURE_SCHEMES),
            bypass_csp: list(switches::BYPASS_CSP_SCHEMES),
            cors: list(switches::CORS_SCHEMES),
            fetch: list(switches::FETCH_SCHEMES),
            service_worker: list(switches::SERVICE_WORKER_SCHEMES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.standard.is_empty()
            && self.secure.is_empty()
            && self.bypass_csp.is_empty()
            && self.cors.is_empty()
            && self.fetch.is_empty()
            && self.service_worker.is_empty()
    }
}

/// Comma separated list; empty entries dropped, first occurrence kept
fn split_schemes(value: &str) -> Vec<String> {
    let mut schemes: Vec<String> = Vec::new();
    for scheme in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !schemes.iter().any(|s| s == scheme) {
            schemes.push(scheme.to_string());
        }
    }
    schemes
}

/// Process-wide description of the product handed to the framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentClient {
    pub product_name: String,
    pub product_version: String,
    pub schemes: SchemeRegistry,
}

impl ContentClient {
    pub fn new(product_name: &str, product_version: &str, flags: &InvocationFlags) -> Self {
        Self {
            product_name: product_name.to_string(),
            product_version: product_version.to_string(),
            schemes: SchemeRegistry::from_flags(flags),
        }
    }

    /// Product token, e.g. `AppHost/1.2.0`
    pub fn product(&self) -> String {
        format!("{}/{}", self.product_name, self.product_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apphost_core::Platform;

    fn flags(args: &[&str]) -> InvocationFlags {
        InvocationFlags::parse(
            std::iter::once("app").chain(args.iter().copied()),
            Platform::Linux,
        )
    }

    #[test]
    fn no_switches_no_schemes() {
        assert!(SchemeRegistry::from_flags(&flags(&[])).is_empty());
    }

    #[test]
    fn lists_are_split_and_deduplicated() {
        let registry = SchemeRegistry::from_flags(&flags(&[
            "--standard-schemes=app, bundle,,app",
            "--secure-schemes=app",
            "--service-worker-schemes=bundle",
        ]));
        assert_eq!(registry.standard, vec!["app", "bundle"]);
        assert_eq!(registry.secure, vec!["app"]);
        assert_eq!(registry.service_worker, vec!["bundle"]);
        assert!(registry.cors.is_empty());
    }

    #[test]
    fn product_token() {
        let client = ContentClient::new("Editor", "3.0.1", &flags(&[]));
        assert_eq!(client.product(), "Editor/3.0.1");
    }
}

//! Switch and environment variable names understood by the startup layer

/// Role identifier of a child process; absent in the coordinator
pub const PROCESS_TYPE: &str = "type";
/// Locale the coordinator hands to its children
pub const LANG: &str = "lang";
pub const ENABLE_LOGGING: &str = "enable-logging";

pub const ENABLE_SANDBOX: &str = "enable-sandbox";
pub const ENABLE_MIXED_SANDBOX: &str = "enable-mixed-sandbox";
pub const NO_SANDBOX: &str = "no-sandbox";
pub const DISABLE_SETUID_SANDBOX: &str = "disable-setuid-sandbox";
pub const ALLOW_FILE_ACCESS_FROM_FILES: &str = "allow-file-access-from-files";
pub const ENABLE_AVFOUNDATION: &str = "enable-avfoundation";

// Custom scheme lists, comma separated
pub const STANDARD_SCHEMES: &str = "standard-schemes";
pub const SECURE_SCHEMES: &str = "secure-schemes";
pub const BYPASS_CSP_SCHEMES: &str = "bypasscsp-schemes";
pub const CORS_SCHEMES: &str = "cors-schemes";
pub const FETCH_SCHEMES: &str = "fetch-schemes";
pub const SERVICE_WORKER_SCHEMES: &str = "service-worker-schemes";

/// Role identifier values
pub mod process_type {
    pub const RENDERER: &str = "renderer";
    pub const UTILITY: &str = "utility";
    pub const GPU: &str = "gpu-process";
    pub const PPAPI_PLUGIN: &str = "ppapi";
    pub const PPAPI_BROKER: &str = "ppapi-broker";
    pub const ZYGOTE: &str = "zygote";
    pub const RELAUNCHER: &str = "relauncher";
}

/// Environment overrides, read once at startup
pub mod env {
    pub const ENABLE_LOGGING: &str = "APPHOST_ENABLE_LOGGING";
    pub const ENABLE_STACK_DUMPING: &str = "APPHOST_ENABLE_STACK_DUMPING";
}

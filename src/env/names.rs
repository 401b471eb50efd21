//! Flag name <-> environment variable name mapping.

use crate::error::{Error, Result};

/// Prefix carried by every environment variable the CLI binds.
pub const ENV_PREFIX: &str = "OPENSDK";

/// `access-token` -> `OPENSDK_ACCESS_TOKEN`
pub fn flag_to_env(flag: &str) -> String {
    let env = flag.replace('-', "_").to_uppercase();
    format!("{}_{}", ENV_PREFIX, env)
}

/// Convert a `KEY=VALUE` assignment into the flag name it configures.
///
/// The `OPENSDK_` prefix on the key is optional. The assignment must contain
/// exactly one `=`.
pub fn env_to_flag(assignment: &str) -> Result<String> {
    let prefix = format!("{}_", ENV_PREFIX);
    let stripped = assignment.strip_prefix(&prefix).unwrap_or(assignment);

    let parts: Vec<&str> = stripped.split('=').collect();
    if parts.len() != 2 {
        return Err(Error::InvalidEnvVar(assignment.to_string()));
    }

    Ok(parts[0].to_lowercase().replace('_', "-"))
}

//! Environment variable discovery and naming.

pub mod names;
pub mod scanner;

pub use names::{env_to_flag, flag_to_env, ENV_PREFIX};
pub use scanner::{scan_environment, EnvBinding, EnvBindings, Environment};

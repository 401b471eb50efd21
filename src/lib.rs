//! Layered configuration and command dispatch for the `opensdk` CLI.
//!
//! Configuration is resolved once per invocation, lowest priority first:
//! built-in defaults, the profile config file, `OPENSDK_*` environment
//! variables, then flags given on the command line.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod render;

pub use error::{Error, Result};

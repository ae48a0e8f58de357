//! CLI commands

pub mod install;
pub mod utils;

//! larago-installer library
//!
//! Scaffolds a new LaraGo project: downloads the boilerplate archive, extracts
//! it into the Go workspace and points its imports at the new project.

pub mod config;
pub mod logging;
pub mod scaffold;

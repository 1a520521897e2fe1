//! Trips CLI library.
//!
//! This crate provides the command-line interface for the trips tool.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, PolicyKind};
pub use config::Config;

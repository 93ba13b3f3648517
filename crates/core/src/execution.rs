//! Target execution module
//!
//! This module handles dependency resolution and the actual execution of
//! targets, one command at a time.

pub mod command;
pub mod resolver;
pub mod runner;

pub use command::{CommandExecutor, Shell};
pub use resolver::DependencyResolver;
pub use runner::{TargetRunner, TargetRunnerConfig};

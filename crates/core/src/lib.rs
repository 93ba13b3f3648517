//! Phony Core Library
//!
//! This is the core library for the phony task runner. It loads declarative
//! target definitions, resolves the prerequisites of a requested target and runs
//! every target's commands in order, stopping at the first failure.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`project_manager`] - High-level project interface
//! - [`registry`] - Declared targets, immutable once loaded
//! - [`execution`] - Dependency resolution and fail-fast execution
//! - [`graph`] - Whole-project dependency graph and cycle report
//! - [`loader`] - Config file discovery and registry construction
//! - [`configs`] - Configuration parsing for projects and target files
//! - [`results`] - Result types for project operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use phony_core::registry::{Target, TargetRegistry};
//! use phony_core::execution::DependencyResolver;
//!
//! # fn example() -> phony_core::types::PhonyResult<()> {
//! let mut registry = TargetRegistry::new();
//! registry.register(Target::new("gen-api-docs", Vec::<String>::new(), ["sphinx-apidoc -o docs/api src"]))?;
//! registry.register(Target::new("docs", Vec::<String>::new(), ["make -C docs html"]))?;
//! registry.register(Target::new("api-docs", ["gen-api-docs", "docs"], Vec::<String>::new()))?;
//!
//! let order = DependencyResolver::new(&registry).resolve("api-docs")?;
//! assert_eq!(order, ["gen-api-docs", "docs", "api-docs"]);
//! # Ok(())
//! # }
//! ```

pub mod colors;
pub mod configs;
pub mod execution;
pub mod graph;
pub mod loader;
pub mod project_manager;
pub mod registry;
pub mod results;
pub mod types;

// Re-export the main types for easier usage
pub use project_manager::{ProjectManager, ProjectManagerConfig};
pub use registry::{Target, TargetRegistry};
pub use types::{PhonyError, PhonyResult};

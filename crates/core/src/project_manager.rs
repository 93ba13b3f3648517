//! High-level project management interface
//!
//! This module provides the [`ProjectManager`] which serves as the primary interface
//! for all project operations. It owns the immutable [`TargetRegistry`] loaded at
//! startup and drives the resolver and the runner over it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use phony_core::project_manager::{ProjectManager, ProjectManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> phony_core::types::PhonyResult<()> {
//! let manager = ProjectManager::new(ProjectManagerConfig {
//!     root: PathBuf::from("."),
//!     config_file: None,
//! })?;
//!
//! // Show what `docs` would run
//! let plan = manager.get_execution_plan(Some("docs"))?;
//!
//! // Run it
//! manager.run_target(Some("docs"), false).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::configs::project::ProjectConfig;
use crate::execution::{DependencyResolver, Shell, TargetRunner, TargetRunnerConfig};
use crate::graph::build_dependency_graph;
use crate::loader::load_project;
use crate::registry::TargetRegistry;
use crate::results::{DependencyGraphResult, ExecutionPlan, RunReport, TargetInfo, TargetListResult};
use crate::types::{PhonyError, PhonyResult};

/// Configuration for initializing a project manager
#[derive(Debug, Clone)]
pub struct ProjectManagerConfig {
    pub root: PathBuf,
    /// Config file to load instead of `<root>/phony.yml`
    pub config_file: Option<PathBuf>,
}

/// High-level project manager that encapsulates all project operations
pub struct ProjectManager {
    pub root: PathBuf,
    pub project_config: ProjectConfig,
    pub config_files: Vec<PathBuf>,
    pub registry: TargetRegistry,
    shell: Shell,
}

impl ProjectManager {
    /// Load the project at the given root
    pub fn new(config: ProjectManagerConfig) -> PhonyResult<Self> {
        let loaded = load_project(&config.root, config.config_file.as_deref())?;
        let shell = Shell::from_config(loaded.config.shell.as_deref())?;

        let mut config_files = vec![loaded.config_file];
        config_files.extend(loaded.fragment_files);

        Ok(Self {
            root: config.root,
            project_config: loaded.config,
            config_files,
            registry: loaded.registry,
            shell,
        })
    }

    pub fn default_target(&self) -> Option<&str> {
        self.project_config.default.as_deref()
    }

    /// The requested target, or the project's default when none is given
    pub fn target_name<'a>(&'a self, requested: Option<&'a str>) -> PhonyResult<&'a str> {
        requested.or(self.default_target()).ok_or_else(|| {
            PhonyError::Config(
                "No target given and no default target configured".to_string(),
            )
        })
    }

    /// List all targets in declaration order
    pub fn list_targets(&self) -> TargetListResult {
        let default = self.default_target();
        let targets = self
            .registry
            .iter()
            .map(|target| TargetInfo {
                name: target.name.clone(),
                description: target.description.clone(),
                prerequisites: target.prerequisites.clone(),
                is_default: default == Some(target.name.as_str()),
            })
            .collect();

        TargetListResult {
            project_name: self.project_config.name.clone(),
            config_files: self.config_files.clone(),
            targets,
        }
    }

    /// Targets a request resolves to, in execution order
    pub fn get_execution_plan(&self, requested: Option<&str>) -> PhonyResult<ExecutionPlan> {
        let name = self.target_name(requested)?;
        let order = DependencyResolver::new(&self.registry).resolve(name)?;

        let targets = order
            .iter()
            .map(|target_name| self.registry.lookup(target_name).cloned())
            .collect::<PhonyResult<Vec<_>>>()?;

        Ok(ExecutionPlan {
            requested: name.to_string(),
            targets,
        })
    }

    /// Resolve and run a target with its prerequisites
    pub async fn run_target(&self, requested: Option<&str>, quiet: bool) -> PhonyResult<RunReport> {
        let name = self.target_name(requested)?;
        let order = DependencyResolver::new(&self.registry).resolve(name)?;

        let runner = TargetRunner::new(
            &self.registry,
            TargetRunnerConfig {
                root: self.root.clone(),
                shell: self.shell.clone(),
                quiet,
            },
        );
        runner.run(&order).await
    }

    /// Get dependency graph information
    pub fn get_dependency_graph(&self) -> DependencyGraphResult {
        build_dependency_graph(&self.registry)
    }

    /// Resolve every target, failing on the first unknown prerequisite or cycle
    pub fn check(&self) -> PhonyResult<usize> {
        let resolver = DependencyResolver::new(&self.registry);
        for name in self.registry.names() {
            resolver.resolve(name)?;
        }
        Ok(self.registry.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_manager() -> ProjectManager {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../demos/matchpy")
            .canonicalize()
            .expect("demos/matchpy directory should exist for tests");
        ProjectManager::new(ProjectManagerConfig {
            root,
            config_file: None,
        })
        .unwrap()
    }

    fn plan_names(plan: &ExecutionPlan) -> Vec<&str> {
        plan.targets.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_demo_project_loads() {
        let manager = demo_manager();
        assert_eq!(manager.default_target(), Some("test"));
        assert!(manager.check().unwrap() >= 9);

        let listed = manager.list_targets();
        assert_eq!(listed.project_name.as_deref(), Some("matchpy"));
        assert!(listed
            .targets
            .iter()
            .any(|t| t.name == "test" && t.is_default));
    }

    #[test]
    fn test_demo_api_docs_plan() {
        let manager = demo_manager();
        let plan = manager.get_execution_plan(Some("api-docs")).unwrap();
        assert_eq!(plan_names(&plan), vec!["gen-api-docs", "docs", "api-docs"]);
    }

    #[test]
    fn test_default_target_is_used() {
        let manager = demo_manager();
        let plan = manager.get_execution_plan(None).unwrap();
        assert_eq!(plan.requested, "test");
        assert_eq!(plan_names(&plan), vec!["test"]);
    }

    #[test]
    fn test_unknown_target_plan() {
        let manager = demo_manager();
        let err = manager.get_execution_plan(Some("publish")).unwrap_err();
        assert!(matches!(err, PhonyError::UnknownTarget { .. }));
    }

    #[test]
    fn test_no_default_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("phony.yml"),
            "targets:\n  - name: test\n    command: 'true'\n",
        )
        .unwrap();

        let manager = ProjectManager::new(ProjectManagerConfig {
            root: temp_dir.path().to_path_buf(),
            config_file: None,
        })
        .unwrap();

        let err = manager.get_execution_plan(None).unwrap_err();
        assert!(err.to_string().contains("no default target"));
    }

    #[test]
    fn test_check_reports_cycles() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("phony.yml"),
            r#"
targets:
  - name: docs
    dependencies: [gen-api-docs]
  - name: gen-api-docs
    dependencies: [docs]
"#,
        )
        .unwrap();

        let manager = ProjectManager::new(ProjectManagerConfig {
            root: temp_dir.path().to_path_buf(),
            config_file: None,
        })
        .unwrap();

        let err = manager.check().unwrap_err();
        assert!(err.to_string().contains("docs -> gen-api-docs -> docs"));
        assert_eq!(manager.get_dependency_graph().cycles.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_target_uses_project_shell_and_env() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("phony.yml"),
            r#"
shell: ["sh", "-eu", "-c"]
env:
  STAGE: project
targets:
  - name: init
    command: "echo $STAGE > init.txt"
  - name: install
    dependencies: [init]
    env:
      STAGE: target
    command: "echo $STAGE > install.txt"
"#,
        )
        .unwrap();

        let manager = ProjectManager::new(ProjectManagerConfig {
            root: temp_dir.path().to_path_buf(),
            config_file: None,
        })
        .unwrap();

        let report = manager.run_target(Some("install"), true).await.unwrap();
        assert_eq!(report.executed().count(), 2);

        let read = |name: &str| std::fs::read_to_string(temp_dir.path().join(name)).unwrap();
        assert_eq!(read("init.txt").trim(), "project");
        assert_eq!(read("install.txt").trim(), "target");
    }
}

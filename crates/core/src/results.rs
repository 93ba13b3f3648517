//! Result types for project operations
//!
//! This module contains the result types returned by [`crate::ProjectManager`]
//! operations and by the runner.

use std::path::PathBuf;
use std::time::Duration;

use crate::registry::Target;

/// Lifecycle of a target during one invocation
///
/// `Pending → Visiting → Resolved → Executing → {Done | Skipped | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Pending,
    Visiting,
    Resolved,
    Executing,
    Done,
    Skipped,
    Failed,
}

impl TargetState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TargetState::Done | TargetState::Skipped | TargetState::Failed
        )
    }
}

/// Final state of one target in a successful run
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub name: String,
    pub state: TargetState,
    pub commands_run: usize,
    pub elapsed: Duration,
}

/// Summary of a run in which every command exited zero
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl RunReport {
    pub fn executed(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.state == TargetState::Done)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.state == TargetState::Skipped)
    }

    pub fn commands_run(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.commands_run).sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.outcomes.iter().map(|outcome| outcome.elapsed).sum()
    }
}

/// Ordered targets a request resolves to
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub requested: String,
    pub targets: Vec<Target>,
}

/// Information about a declared target
#[derive(Debug, Clone)]
pub struct TargetInfo {
    pub name: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    pub is_default: bool,
}

/// Result of listing the project's targets
#[derive(Debug)]
pub struct TargetListResult {
    pub project_name: Option<String>,
    pub config_files: Vec<PathBuf>,
    pub targets: Vec<TargetInfo>,
}

/// Result of getting the dependency graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: petgraph::Graph<String, ()>,
    pub cycles: Vec<Vec<String>>,
    /// `(target, missing prerequisite)` pairs
    pub missing: Vec<(String, String)>,
}

//! Target registry
//!
//! Holds every declared target. The registry is filled once while the project is
//! loaded and is only read afterwards, by the resolver and the runner alike.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::types::{PhonyError, PhonyResult};

/// A named unit of work: prerequisites to run first, then commands to run in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    pub commands: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub working_directory: Option<PathBuf>,
    /// A target that always runs is never skipped, whatever exists on disk
    pub always_run: bool,
    pub outputs: Vec<PathBuf>,
}

impl Target {
    pub fn new<N, P, C>(name: N, prerequisites: P, commands: C) -> Self
    where
        N: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            prerequisites: prerequisites.into_iter().map(Into::into).collect(),
            commands: commands.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
            working_directory: None,
            always_run: true,
            outputs: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Make the target skippable once every one of `outputs` exists
    pub fn with_outputs<O>(mut self, outputs: O) -> Self
    where
        O: IntoIterator,
        O::Item: Into<PathBuf>,
    {
        self.always_run = false;
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    /// Directory the target's commands run in
    pub fn run_dir(&self, root: &Path) -> PathBuf {
        match &self.working_directory {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }

    /// Whether the target can be skipped in this run
    pub fn is_up_to_date(&self, root: &Path) -> bool {
        if self.always_run || self.outputs.is_empty() {
            return false;
        }
        let dir = self.run_dir(root);
        self.outputs.iter().all(|output| dir.join(output).exists())
    }

    fn validate(&self) -> PhonyResult<()> {
        if self.name.trim().is_empty() {
            return Err(PhonyError::Config("Target names must not be empty".to_string()));
        }

        if let Some(position) = self.commands.iter().position(|c| c.trim().is_empty()) {
            return Err(PhonyError::Config(format!(
                "Target '{}' has an empty command at position {}",
                self.name,
                position + 1
            )));
        }

        if !self.always_run && self.outputs.is_empty() {
            return Err(PhonyError::Config(format!(
                "Target '{}' sets alwaysRun to false but declares no outputs",
                self.name
            )));
        }

        Ok(())
    }
}

/// Every target of a project, in declaration order
#[derive(Debug, Default, Clone)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target. Names must be unique within the registry.
    pub fn register(&mut self, target: Target) -> PhonyResult<()> {
        if self.index.contains_key(&target.name) {
            return Err(PhonyError::DuplicateTarget(target.name));
        }
        target.validate()?;

        log::debug!(
            "Registered target '{}' ({} prerequisites, {} commands)",
            target.name,
            target.prerequisites.len(),
            target.commands.len()
        );
        self.index.insert(target.name.clone(), self.targets.len());
        self.targets.push(target);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> PhonyResult<&Target> {
        self.get(name).ok_or_else(|| PhonyError::UnknownTarget {
            name: name.to_string(),
            required_by: None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.index.get(name).map(|&i| &self.targets[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<'a> IntoIterator for &'a TargetRegistry {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

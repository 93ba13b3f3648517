use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::PhonyResult;

/// One shell command line, or a list of them run in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    Single(String),
    Multiple(Vec<String>),
}

impl Command {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Command::Single(line) => vec![line],
            Command::Multiple(lines) => lines,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    pub description: Option<String>,
    /// Targets that must complete before this one, in the order listed
    pub dependencies: Option<Vec<String>>,
    pub command: Option<Command>,
    /// Environment overrides for this target's commands
    pub env: Option<BTreeMap<String, String>>,
    /// Directory the commands run in, relative to the project root
    pub working_directory: Option<String>,
    /// Run the target on every invocation. Defaults to true.
    pub always_run: Option<bool>,
    /// Paths whose existence lets a target with `alwaysRun: false` be skipped
    pub outputs: Option<Vec<String>>,
}

/// Extra target definitions picked up through the project's `includes`
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetsFileConfig {
    pub description: Option<String>,
    pub targets: Vec<TargetConfig>,
}

pub fn parse_targets_config(yaml_str: &str) -> PhonyResult<TargetsFileConfig> {
    let config: TargetsFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

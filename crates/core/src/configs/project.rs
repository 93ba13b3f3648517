use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configs::targets::TargetConfig;
use crate::types::PhonyResult;

/// Root `phony.yml` of a project
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Target run when none is given on the command line
    pub default: Option<String>,
    /// Program and leading arguments used to run each command line, e.g. `["bash", "-c"]`
    pub shell: Option<Vec<String>>,
    /// Environment overrides applied to every target
    pub env: Option<BTreeMap<String, String>>,
    /// Glob patterns, relative to the project root, of extra target files
    pub includes: Option<Vec<String>>,
    pub targets: Option<Vec<TargetConfig>>,
}

pub fn parse_project_config(yaml_str: &str) -> PhonyResult<ProjectConfig> {
    let config: ProjectConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_project() {
        let config = parse_project_config("targets: []\n").unwrap();
        assert!(config.default.is_none());
        assert_eq!(config.targets.map(|t| t.len()), Some(0));
    }

    #[test]
    fn test_parse_project_settings() {
        let config = parse_project_config(
            r#"
name: matchpy
default: test
shell: ["bash", "-c"]
env:
  PYTHONDONTWRITEBYTECODE: "1"
targets:
  - name: test
    command: "py.test tests/"
"#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("matchpy"));
        assert_eq!(config.default.as_deref(), Some("test"));
        assert_eq!(
            config.shell,
            Some(vec!["bash".to_string(), "-c".to_string()])
        );
        assert_eq!(
            config
                .env
                .as_ref()
                .and_then(|env| env.get("PYTHONDONTWRITEBYTECODE"))
                .map(String::as_str),
            Some("1")
        );
    }
}

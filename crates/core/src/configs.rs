//! Declarative configuration files
//!
//! A project is described by a root `phony.yml` ([`project::ProjectConfig`]) and
//! any number of fragment files ([`targets::TargetsFileConfig`]) matched by its
//! `includes` patterns.

pub mod project;
pub mod targets;

use crate::types::{PhonyError, PhonyResult};

/// JSON schema of the root config file, pretty-printed
pub fn config_schema() -> PhonyResult<String> {
    let schema = schemars::schema_for!(project::ProjectConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| PhonyError::Config(format!("Failed to serialize config schema: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_target_fields() {
        let schema = config_schema().unwrap();
        assert!(schema.contains("\"targets\""));
        assert!(schema.contains("\"alwaysRun\""));
        assert!(schema.contains("\"workingDirectory\""));
    }
}

//! Dependency resolution
//!
//! Turns a requested target into the list of targets to execute, prerequisites
//! first and the requested target last. Each target appears exactly once.

use std::collections::HashMap;

use crate::registry::TargetRegistry;
use crate::results::TargetState;
use crate::types::{PhonyError, PhonyResult};

/// Depth-first resolver over a [`TargetRegistry`]
pub struct DependencyResolver<'a> {
    registry: &'a TargetRegistry,
}

/// Per-invocation traversal state, dropped once resolution ends
struct Traversal<'a> {
    states: HashMap<&'a str, TargetState>,
    path: Vec<&'a str>,
    order: Vec<&'a str>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(registry: &'a TargetRegistry) -> Self {
        Self { registry }
    }

    /// Ordered target names to execute for `requested`
    pub fn resolve(&self, requested: &str) -> PhonyResult<Vec<String>> {
        let root = self.registry.lookup(requested)?;

        let mut traversal = Traversal {
            states: HashMap::new(),
            path: Vec::new(),
            order: Vec::new(),
        };
        self.visit(&root.name, None, &mut traversal)?;

        log::debug!(
            "Resolved '{}' to [{}]",
            requested,
            traversal.order.join(", ")
        );
        Ok(traversal.order.into_iter().map(str::to_string).collect())
    }

    fn visit(
        &self,
        name: &'a str,
        required_by: Option<&'a str>,
        traversal: &mut Traversal<'a>,
    ) -> PhonyResult<()> {
        match traversal.states.get(name) {
            Some(TargetState::Resolved) => return Ok(()),
            Some(TargetState::Visiting) => {
                let start = traversal
                    .path
                    .iter()
                    .position(|&entry| entry == name)
                    .unwrap_or(0);
                let mut path: Vec<String> = traversal.path[start..]
                    .iter()
                    .map(|entry| entry.to_string())
                    .collect();
                path.push(name.to_string());
                return Err(PhonyError::CyclicDependency { path });
            }
            _ => {}
        }

        let target = self
            .registry
            .get(name)
            .ok_or_else(|| PhonyError::UnknownTarget {
                name: name.to_string(),
                required_by: required_by.map(str::to_string),
            })?;

        traversal.states.insert(&target.name, TargetState::Visiting);
        traversal.path.push(&target.name);

        for prerequisite in &target.prerequisites {
            self.visit(prerequisite, Some(target.name.as_str()), traversal)?;
        }

        traversal.path.pop();
        traversal.states.insert(&target.name, TargetState::Resolved);
        traversal.order.push(&target.name);
        Ok(())
    }
}

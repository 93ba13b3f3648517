//! Whole-project dependency graph
//!
//! Unlike the resolver, which stops at the first problem reachable from one
//! target, this view covers every declared target and collects all cycles and
//! missing prerequisites at once.

use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::registry::TargetRegistry;
use crate::results::DependencyGraphResult;

/// Build the prerequisite graph. Edges point from a target to its prerequisites.
pub fn build_dependency_graph(registry: &TargetRegistry) -> DependencyGraphResult {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    for target in registry {
        let node_index = graph.add_node(target.name.clone());
        node_indices.insert(target.name.as_str(), node_index);
    }

    let mut missing = Vec::new();
    for target in registry {
        let from_node = node_indices[target.name.as_str()];
        for prerequisite in &target.prerequisites {
            match node_indices.get(prerequisite.as_str()) {
                Some(&to_node) => {
                    graph.add_edge(from_node, to_node, ());
                }
                None => missing.push((target.name.clone(), prerequisite.clone())),
            }
        }
    }

    let cycles = find_cycles(&graph);

    DependencyGraphResult {
        graph,
        cycles,
        missing,
    }
}

/// Strongly connected components that form a cycle, each sorted by name
fn find_cycles(graph: &DiGraph<String, ()>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();
    cycles
}

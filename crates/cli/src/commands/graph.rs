use anyhow::Result;
use colored::*;
use petgraph::visit::EdgeRef;
use phony_core::colors::get_target_color;
use phony_core::project_manager::ProjectManager;
use phony_core::results::DependencyGraphResult;

pub fn execute(manager: &ProjectManager) -> Result<()> {
    let result = manager.get_dependency_graph();
    print!("{}", render(&result));
    Ok(())
}

/// One line per target, `name ← prerequisites` in declared order, followed by
/// any cycles and undefined prerequisites.
fn render(result: &DependencyGraphResult) -> String {
    let graph = &result.graph;
    let mut out = format!(
        "{} ({} targets, {} edges)\n",
        "Dependency graph".bold(),
        graph.node_count(),
        graph.edge_count()
    );

    let width = graph.node_weights().map(String::len).max().unwrap_or(0);
    for node in graph.node_indices() {
        let name = &graph[node];
        let mut edges: Vec<_> = graph.edges(node).collect();
        edges.sort_by_key(|edge| edge.id());

        let mut prerequisites: Vec<String> =
            edges.iter().map(|edge| graph[edge.target()].clone()).collect();
        prerequisites.extend(
            result
                .missing
                .iter()
                .filter(|(target, _)| target == name)
                .map(|(_, missing)| format!("{}?", missing)),
        );

        let padded = format!("{:<width$}", name, width = width);
        if prerequisites.is_empty() {
            out.push_str(&format!("  {}\n", padded.color(get_target_color(name))));
        } else {
            out.push_str(&format!(
                "  {} {} {}\n",
                padded.color(get_target_color(name)),
                "←".dimmed(),
                prerequisites.join(", ")
            ));
        }
    }

    if !result.cycles.is_empty() {
        out.push_str(&format!("\n{}\n", "Cycles".red().bold()));
        for members in &result.cycles {
            let line = match members.as_slice() {
                [only] => format!("{} depends on itself", only),
                _ => format!("{} depend on each other", members.join(", ")),
            };
            out.push_str(&format!("  {}\n", line.red()));
        }
    }

    if !result.missing.is_empty() {
        out.push_str(&format!("\n{}\n", "Undefined prerequisites (marked ?)".yellow().bold()));
        for (target, missing) in &result.missing {
            out.push_str(&format!("  {} needs {}\n", target, missing.yellow()));
        }
    }

    out
}

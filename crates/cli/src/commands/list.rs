use anyhow::Result;
use colored::*;
use phony_core::project_manager::ProjectManager;

pub fn execute(manager: &ProjectManager) -> Result<()> {
    let result = manager.list_targets();

    let heading = match &result.project_name {
        Some(name) => format!("Targets of {}", name),
        None => "Targets".to_string(),
    };
    println!("{}", heading.bold().underline());

    if result.targets.is_empty() {
        println!("  {}", "No targets found".dimmed());
        return Ok(());
    }

    let width = result
        .targets
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(0);

    for target in &result.targets {
        let name = format!("{:width$}", target.name, width = width);
        let marker = if target.is_default {
            format!(" {}", "[default]".green())
        } else {
            String::new()
        };
        match &target.description {
            Some(description) => {
                println!("  {}  {}{}", name.blue().bold(), description.dimmed(), marker)
            }
            None => println!("  {}{}", name.blue().bold(), marker),
        }
    }

    Ok(())
}

use anyhow::Result;
use colored::*;
use phony_core::project_manager::ProjectManager;

pub fn execute(manager: &ProjectManager, target: Option<&str>) -> Result<()> {
    let plan = manager.get_execution_plan(target)?;

    println!("{} {}", "Execution plan for".bold(), plan.requested.cyan());

    println!("\n{}:", "Execution order".bold());
    for (i, target) in plan.targets.iter().enumerate() {
        let skippable = if target.always_run {
            String::new()
        } else {
            format!(" {}", "(skipped when outputs exist)".dimmed())
        };
        println!("  {}. {}{}", i + 1, target.name, skippable);

        if target.commands.is_empty() {
            println!("     {}", "no commands".dimmed());
        }
        for command in &target.commands {
            println!("     {} {}", "$".bright_black(), command);
        }
    }

    Ok(())
}

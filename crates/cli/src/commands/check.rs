use anyhow::Result;
use colored::*;
use phony_core::project_manager::ProjectManager;

pub fn execute(manager: &ProjectManager) -> Result<()> {
    let count = manager.check()?;
    println!(
        "{} {} target(s) resolve",
        "✓".green().bold(),
        count
    );
    Ok(())
}

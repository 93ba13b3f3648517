use anyhow::Result;
use colored::*;
use phony_core::project_manager::ProjectManager;

pub async fn execute(manager: &ProjectManager, target: Option<&str>, quiet: bool) -> Result<()> {
    let report = manager.run_target(target, quiet).await?;

    if !quiet {
        let skipped = report.skipped().count();
        let mut summary = format!(
            "{} target(s), {} command(s) in {:.2}s",
            report.executed().count(),
            report.commands_run(),
            report.elapsed().as_secs_f64()
        );
        if skipped > 0 {
            summary.push_str(&format!(", {} up to date", skipped));
        }
        println!();
        println!("{} {}", "Finished".green().bold(), summary);
    }

    Ok(())
}

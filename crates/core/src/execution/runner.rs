//! High-level target runner
//!
//! Executes an already resolved target order, one command at a time, and stops
//! the whole run at the first command that exits nonzero.

use std::path::PathBuf;
use std::time::Instant;

use colored::*;
use tokio::sync::watch;

use crate::colors::get_target_color;
use crate::execution::command::{CommandExecutor, Shell};
use crate::registry::{Target, TargetRegistry};
use crate::results::{RunReport, TargetOutcome, TargetState};
use crate::types::{PhonyError, PhonyResult};

/// Configuration for the target runner
#[derive(Debug, Clone)]
pub struct TargetRunnerConfig {
    /// Project root, the default working directory of every command
    pub root: PathBuf,
    pub shell: Shell,
    /// Suppress headers, command echo and completion lines
    pub quiet: bool,
}

impl TargetRunnerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            shell: Shell::default(),
            quiet: false,
        }
    }
}

/// Sequential, fail-fast runner over a [`TargetRegistry`]
pub struct TargetRunner<'a> {
    registry: &'a TargetRegistry,
    config: TargetRunnerConfig,
}

impl<'a> TargetRunner<'a> {
    pub fn new(registry: &'a TargetRegistry, config: TargetRunnerConfig) -> Self {
        Self { registry, config }
    }

    /// Run `order`, stopping on Ctrl-C
    pub async fn run(&self, order: &[String]) -> PhonyResult<RunReport> {
        let (tx, rx) = watch::channel(false);
        let listener = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });

        let result = self.run_until_cancelled(order, rx).await;
        listener.abort();
        result
    }

    /// Run `order`, stopping as soon as `cancel` turns true
    pub async fn run_until_cancelled(
        &self,
        order: &[String],
        mut cancel: watch::Receiver<bool>,
    ) -> PhonyResult<RunReport> {
        // Every name must be known before the first child is spawned.
        let targets = order
            .iter()
            .map(|name| self.registry.lookup(name))
            .collect::<PhonyResult<Vec<_>>>()?;

        let total = targets.len();
        let mut report = RunReport::default();

        for (i, target) in targets.into_iter().enumerate() {
            // Nothing starts once cancelled, targets without commands included.
            if *cancel.borrow() {
                transition(target, TargetState::Pending, TargetState::Failed);
                log::info!("Interrupted before '{}' started", target.name);
                return Err(PhonyError::Interrupted {
                    target: target.name.clone(),
                });
            }

            transition(target, TargetState::Pending, TargetState::Executing);
            match self.run_target(target, &mut cancel).await {
                Ok(outcome) => {
                    transition(target, TargetState::Executing, outcome.state);
                    report.outcomes.push(outcome);
                }
                Err(err) => {
                    transition(target, TargetState::Executing, TargetState::Failed);
                    log::info!(
                        "Target '{}' failed, {} queued target(s) not started",
                        target.name,
                        total - i - 1
                    );
                    return Err(err);
                }
            }
        }

        Ok(report)
    }

    async fn run_target(
        &self,
        target: &Target,
        cancel: &mut watch::Receiver<bool>,
    ) -> PhonyResult<TargetOutcome> {
        if target.is_up_to_date(&self.config.root) {
            log::info!("Skipping '{}': all outputs exist", target.name);
            if !self.config.quiet {
                println!(
                    "{} {}",
                    "-".bright_black(),
                    format!("Skipped {} (up to date)", target.name).bright_black()
                );
            }
            return Ok(TargetOutcome {
                name: target.name.clone(),
                state: TargetState::Skipped,
                commands_run: 0,
                elapsed: Default::default(),
            });
        }

        if !self.config.quiet {
            self.print_header(target);
        }

        let started = Instant::now();
        let executor = CommandExecutor::new(&self.config.root, &self.config.shell, target)
            .echo(!self.config.quiet);

        for command in &target.commands {
            if let Err(err) = executor.execute_shell_command(command, cancel).await {
                self.print_failure(target, &err);
                return Err(err);
            }
        }

        let elapsed = started.elapsed();
        if !self.config.quiet {
            println!(
                "{} {}",
                "✓".green().bold(),
                format!("Completed {} in {:.2}s", target.name, elapsed.as_secs_f64())
                    .color(get_target_color(&target.name))
            );
        }

        Ok(TargetOutcome {
            name: target.name.clone(),
            state: TargetState::Done,
            commands_run: target.commands.len(),
            elapsed,
        })
    }

    fn print_header(&self, target: &Target) {
        let target_color = get_target_color(&target.name);
        println!();
        println!(
            "┌─ {} {}",
            "Running target".bold(),
            target.name.color(target_color).bold()
        );
        if let Some(description) = &target.description {
            println!("└─ {}", description.bright_black());
        }
    }

    fn print_failure(&self, target: &Target, err: &PhonyError) {
        if self.config.quiet {
            return;
        }
        let reason = match err {
            PhonyError::CommandFailure { code, .. } => format!("exit code {}", code),
            PhonyError::Interrupted { .. } => "interrupted".to_string(),
            other => other.to_string(),
        };
        eprintln!(
            "{} {}",
            "✗".red().bold(),
            format!("{} failed ({})", target.name, reason).red()
        );
    }
}

fn transition(target: &Target, from: TargetState, to: TargetState) {
    debug_assert!(!from.is_terminal());
    log::debug!("{}: {:?} -> {:?}", target.name, from, to);
}

//! Command execution utilities
//!
//! Every command line of a target is handed to the configured shell as a single
//! opaque argument. Children inherit stdio, so their output streams live.

use std::path::Path;
use std::process::ExitStatus;

use colored::*;
use tokio::process::Command;
use tokio::sync::watch;

use crate::registry::Target;
use crate::types::{PhonyError, PhonyResult};

/// Program and leading arguments used to run a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Shell {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                args: vec!["/C".to_string()],
            }
        } else {
            Self {
                program: "sh".to_string(),
                args: vec!["-c".to_string()],
            }
        }
    }
}

impl Shell {
    /// Build a shell from the `shell` setting, e.g. `["bash", "-eu", "-c"]`
    pub fn from_config(parts: Option<&[String]>) -> PhonyResult<Self> {
        match parts {
            None => Ok(Self::default()),
            Some([]) => Err(PhonyError::Config(
                "The 'shell' setting must name a program".to_string(),
            )),
            Some([program, args @ ..]) => Ok(Self {
                program: program.clone(),
                args: args.to_vec(),
            }),
        }
    }
}

/// Runs the commands of one target
pub struct CommandExecutor<'a> {
    root: &'a Path,
    shell: &'a Shell,
    target: &'a Target,
    echo: bool,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(root: &'a Path, shell: &'a Shell, target: &'a Target) -> Self {
        Self {
            root,
            shell,
            target,
            echo: true,
        }
    }

    /// Print each command line before running it
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Execute a single shell command and wait for it to exit
    ///
    /// Fails with [`PhonyError::Interrupted`] as soon as `cancel` turns true,
    /// killing the child if one is running.
    pub async fn execute_shell_command(
        &self,
        cmd: &str,
        cancel: &mut watch::Receiver<bool>,
    ) -> PhonyResult<()> {
        if *cancel.borrow() {
            return Err(self.interrupted());
        }

        if self.echo {
            println!("{} {}", "$".bright_black(), cmd.bold());
        }

        let run_dir = self.target.run_dir(self.root);
        log::debug!(
            "Spawning {} {:?} {:?} in {}",
            self.shell.program,
            self.shell.args,
            cmd,
            run_dir.display()
        );

        let mut command = Command::new(&self.shell.program);
        command
            .args(&self.shell.args)
            .arg(cmd)
            .current_dir(&run_dir)
            .envs(&self.target.env)
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| self.spawn_error(cmd, source))?;

        let status = tokio::select! {
            status = child.wait() => status.map_err(|source| self.spawn_error(cmd, source))?,
            _ = cancelled(cancel) => {
                log::info!("Interrupt received, stopping '{}'", self.target.name);
                if let Err(e) = child.kill().await {
                    log::warn!("Failed to kill '{}': {}", cmd, e);
                }
                return Err(self.interrupted());
            }
        };

        if status.success() {
            return Ok(());
        }

        // The child usually sees the same SIGINT we do and may exit first.
        if *cancel.borrow() {
            return Err(self.interrupted());
        }

        Err(PhonyError::CommandFailure {
            target: self.target.name.clone(),
            command: cmd.to_string(),
            code: exit_code(status),
        })
    }

    fn spawn_error(&self, cmd: &str, source: std::io::Error) -> PhonyError {
        PhonyError::Spawn {
            target: self.target.name.clone(),
            command: cmd.to_string(),
            source,
        }
    }

    fn interrupted(&self) -> PhonyError {
        PhonyError::Interrupted {
            target: self.target.name.clone(),
        }
    }
}

/// Resolves once `cancel` turns true; never resolves if the sender is gone
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|&cancelled| cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Exit code of a finished child, `128 + N` when killed by signal `N`
pub fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => 128 + signal,
        None => 1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> i32 {
    1
}

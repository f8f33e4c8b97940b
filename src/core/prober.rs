use crate::domain::model::{CommandOutput, ToolCommand};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{LaunchError, Result};
use std::path::Path;

/// Checks that every toolchain command answers its version query.
pub struct DependencyProber<'a, R: CommandRunner> {
    runner: &'a R,
    commands: &'a [ToolCommand],
    cwd: &'a Path,
}

impl<'a, R: CommandRunner> DependencyProber<'a, R> {
    pub fn new(runner: &'a R, commands: &'a [ToolCommand], cwd: &'a Path) -> Self {
        Self {
            runner,
            commands,
            cwd,
        }
    }

    /// Fails with the first command that could not be started or exited non-zero.
    pub fn check(&self) -> Result<()> {
        for command in self.commands {
            let available = match self.runner.run(command, self.cwd, CommandOutput::Suppressed) {
                Ok(status) => status.is_success(),
                Err(e) => {
                    tracing::debug!("Could not start `{}`: {}", command, e);
                    false
                }
            };

            if !available {
                return Err(LaunchError::ToolchainMissing {
                    command: command.to_string(),
                });
            }
        }
        Ok(())
    }

    /// `true` when the whole toolchain answered; the failing command is logged.
    pub fn probe(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    /// Command lines of the configured toolchain, for operator messages.
    pub fn describe(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use crate::domain::model::{CommandOutput, CommandStatus, ToolCommand};
use crate::domain::ports::CommandRunner;
use std::path::Path;
use std::process::{Command, Stdio};

/// Spawns real processes and blocks until they exit.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        command: &ToolCommand,
        cwd: &Path,
        output: CommandOutput,
    ) -> std::io::Result<CommandStatus> {
        let mut process = Command::new(&command.program);
        process.args(&command.args).current_dir(cwd);

        if output == CommandOutput::Suppressed {
            process
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        tracing::debug!("Running `{}` in {}", command, cwd.display());
        let status = process.status()?;

        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

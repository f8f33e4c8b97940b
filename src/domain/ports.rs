use crate::domain::model::{CommandOutput, CommandStatus, ToolCommand};
use std::path::Path;

/// Runs external commands to completion.
///
/// Errors are only returned when the process could not be started at all;
/// a non-zero exit is reported through [`CommandStatus`].
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        command: &ToolCommand,
        cwd: &Path,
        output: CommandOutput,
    ) -> std::io::Result<CommandStatus>;
}

pub trait BrowserOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(
        &self,
        command: &ToolCommand,
        cwd: &Path,
        output: CommandOutput,
    ) -> std::io::Result<CommandStatus> {
        (**self).run(command, cwd, output)
    }
}

impl<T: BrowserOpener + ?Sized> BrowserOpener for &T {
    fn open(&self, url: &str) -> std::io::Result<()> {
        (**self).open(url)
    }
}

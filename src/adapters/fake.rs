use crate::domain::model::{CommandOutput, CommandStatus, ToolCommand};
use crate::domain::ports::{BrowserOpener, CommandRunner};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub command: String,
    pub cwd: PathBuf,
    pub output: CommandOutput,
}

#[derive(Debug, Clone, Copy)]
enum Canned {
    Exit(i32),
    NotFound,
}

/// Command runner that never spawns anything.
///
/// Commands succeed unless a canned result was registered for their full
/// command line (`"npm run build"`) or, failing that, their program name.
/// Every invocation is recorded in order.
#[derive(Default)]
pub struct FakeCommandRunner {
    canned: HashMap<String, Canned>,
    calls: Mutex<Vec<RecordedCommand>>,
    on_run: Option<fn(&ToolCommand, &Path)>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, key: &str, code: i32) -> Self {
        self.canned.insert(key.to_string(), Canned::Exit(code));
        self
    }

    pub fn with_missing_program(mut self, key: &str) -> Self {
        self.canned.insert(key.to_string(), Canned::NotFound);
        self
    }

    /// Hook invoked for every successful command, e.g. to create build output.
    pub fn with_side_effect(mut self, hook: fn(&ToolCommand, &Path)) -> Self {
        self.on_run = Some(hook);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.command).collect()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(
        &self,
        command: &ToolCommand,
        cwd: &Path,
        output: CommandOutput,
    ) -> std::io::Result<CommandStatus> {
        let line = command.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCommand {
                command: line.clone(),
                cwd: cwd.to_path_buf(),
                output,
            });
        }

        let canned = self
            .canned
            .get(&line)
            .or_else(|| self.canned.get(&command.program))
            .copied();

        match canned {
            Some(Canned::NotFound) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: command not found", command.program),
            )),
            Some(Canned::Exit(code)) if code != 0 => Ok(CommandStatus::failure(code)),
            _ => {
                if let Some(hook) = self.on_run {
                    hook(command, cwd);
                }
                Ok(CommandStatus::success())
            }
        }
    }
}

/// Browser opener that only remembers the URLs it was asked to open.
#[derive(Debug, Default)]
pub struct FakeBrowser {
    opened: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }
}

impl BrowserOpener for FakeBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
        if self.fail {
            return Err(std::io::Error::other("no browser available"));
        }
        Ok(())
    }
}

use crate::config::toml_config::LauncherSettings;
use crate::domain::model::{BuildReport, BuildState, CommandOutput, ToolCommand};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{LaunchError, Result};
use std::path::Path;

/// Runs the toolchain's install and build steps when the artifacts are missing.
///
/// Only the presence of the marker file is checked. A stale or partially
/// written output directory is treated as already built.
pub struct BuildOrchestrator<'a, R: CommandRunner> {
    runner: &'a R,
    settings: &'a LauncherSettings,
    root: &'a Path,
}

impl<'a, R: CommandRunner> BuildOrchestrator<'a, R> {
    pub fn new(runner: &'a R, settings: &'a LauncherSettings, root: &'a Path) -> Self {
        Self {
            runner,
            settings,
            root,
        }
    }

    pub fn build_state(&self) -> BuildState {
        BuildState::detect(
            self.root,
            &self.settings.build.output_dir,
            &self.settings.build.marker_file,
        )
    }

    pub fn ensure_built(&self) -> Result<BuildReport> {
        if self.build_state() == BuildState::Present {
            tracing::debug!(
                "Found {}, skipping build",
                self.settings
                    .build
                    .output_dir
                    .join(&self.settings.build.marker_file)
                    .display()
            );
            println!("✅ Library already built!\n");
            return Ok(BuildReport::AlreadyBuilt);
        }

        println!("📦 Building the library...");
        println!("   Running: {}", self.settings.toolchain.install);
        self.run_step(&self.settings.toolchain.install)?;

        println!("\n   Running: {}", self.settings.toolchain.build);
        self.run_step(&self.settings.toolchain.build)?;

        println!("✅ Build completed successfully!\n");
        tracing::info!("Build finished in {}", self.root.display());
        Ok(BuildReport::Built)
    }

    // 子程序錯誤在此轉為 BuildFailed，不向外傳遞 io::Error
    fn run_step(&self, command: &ToolCommand) -> Result<()> {
        let status = self
            .runner
            .run(command, self.root, CommandOutput::Inherited)
            .map_err(|e| LaunchError::BuildFailed {
                command: command.to_string(),
                status: format!("could not be started: {}", e),
            })?;

        if !status.is_success() {
            return Err(LaunchError::BuildFailed {
                command: command.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

use crate::config::toml_config::LauncherSettings;
use crate::core::builder::BuildOrchestrator;
use crate::core::prober::DependencyProber;
use crate::core::resolver::resolve;
use crate::core::server::{render_banner, DevServer};
use crate::domain::model::{ExampleEntry, ServeOutcome, ServerConfig};
use crate::domain::ports::{BrowserOpener, CommandRunner};
use crate::utils::error::{LaunchError, Result};
use std::future::Future;

/// Sequences probe, build, resolve, serve and browser open.
pub struct Launcher<R: CommandRunner, B: BrowserOpener> {
    runner: R,
    browser: B,
    settings: LauncherSettings,
}

impl<R: CommandRunner, B: BrowserOpener> Launcher<R, B> {
    pub fn new(runner: R, browser: B, settings: LauncherSettings) -> Self {
        Self {
            runner,
            browser,
            settings,
        }
    }

    /// Blocking part of the launch: toolchain probe, build and page resolution.
    ///
    /// A missing toolchain only produces a warning; whatever artifacts already
    /// exist are served as they are.
    pub fn prepare(&self, config: &ServerConfig) -> Result<ExampleEntry> {
        let prober =
            DependencyProber::new(&self.runner, &self.settings.toolchain.probe, &config.root);

        if prober.probe() {
            BuildOrchestrator::new(&self.runner, &self.settings, &config.root).ensure_built()?;
        } else {
            let warning = LaunchError::ToolchainMissing {
                command: prober.describe(),
            };
            tracing::warn!("Skipping build step: {}", warning);
            println!("⚠️  {}", warning.user_friendly_message());
            println!("   {}", warning.recovery_suggestion());
            println!("   Continuing anyway...\n");
        }

        Ok(resolve(config.example.as_deref()))
    }

    /// Binds the server, announces the page, opens the browser once and
    /// serves until `shutdown` resolves.
    pub async fn serve<F>(
        &self,
        config: &ServerConfig,
        entry: &ExampleEntry,
        shutdown: F,
    ) -> Result<ServeOutcome>
    where
        F: Future<Output = ()> + Send,
    {
        let server = DevServer::bind(config).await?;
        let url = server.page_url(entry);

        println!("{}", render_banner(server.port(), entry));

        if config.open_browser {
            // 開啟失敗不影響伺服器運作
            if let Err(e) = self.browser.open(&url) {
                tracing::warn!("Failed to open browser: {}", e);
                println!("Open {} manually in your browser", url);
            }
        }

        server.run_until(shutdown).await
    }

    pub async fn launch<F>(&self, config: &ServerConfig, shutdown: F) -> Result<ServeOutcome>
    where
        F: Future<Output = ()> + Send,
    {
        let entry = self.prepare(config)?;
        tracing::info!("Resolved page {} ({})", entry.id(), entry.relative_path());
        self.serve(config, &entry, shutdown).await
    }
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// 將啟動結果轉為程序結束碼並輸出最後訊息
pub fn finish(result: Result<ServeOutcome>) -> i32 {
    match result {
        Ok(ServeOutcome::Interrupted) => {
            println!("\n\n✋ Server stopped by user");
            println!("👋 Thanks for testing Open DataViz!");
            0
        }
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &LaunchError) -> i32 {
    tracing::error!(
        "❌ Launch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("   {}", e.recovery_suggestion());

    e.exit_code()
}

#[cfg(feature = "cli")]
pub use self::cli::run_cli;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::config::CliConfig;
    use crate::core::resolver::render_catalog;

    /// Runs the launcher for parsed command line flags and returns the exit code.
    pub async fn run_cli<R, B, F>(cli: &CliConfig, runner: R, browser: B, shutdown: F) -> i32
    where
        R: CommandRunner,
        B: BrowserOpener,
        F: Future<Output = ()> + Send,
    {
        if cli.list {
            println!("{}", render_catalog());
            return 0;
        }

        let result = async {
            let settings = LauncherSettings::load(cli.config.as_deref())?;
            let config = cli.server_config()?;
            tracing::debug!("Server config: {:?}", config);

            let launcher = Launcher::new(runner, browser, settings);
            let outcome = launcher.launch(&config, shutdown).await?;
            Ok::<_, LaunchError>(outcome)
        }
        .await;

        finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FakeBrowser, FakeCommandRunner};
    use tempfile::TempDir;

    fn built_root() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("dist")).unwrap();
        std::fs::write(temp_dir.path().join("dist/index.js"), "").unwrap();
        temp_dir
    }

    #[test]
    fn test_prepare_skips_build_without_toolchain() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeCommandRunner::new().with_missing_program("node");
        let browser = FakeBrowser::new();
        let launcher = Launcher::new(&runner, &browser, LauncherSettings::default());

        let config = ServerConfig::new(0, temp_dir.path()).with_example("pie");
        let entry = launcher.prepare(&config).unwrap();

        assert_eq!(entry.id(), "pie");
        assert_eq!(runner.command_lines(), vec!["node --version".to_string()]);
    }

    #[test]
    fn test_prepare_runs_no_install_when_npm_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeCommandRunner::new().with_missing_program("npm");
        let browser = FakeBrowser::new();
        let launcher = Launcher::new(&runner, &browser, LauncherSettings::default());

        let config = ServerConfig::new(0, temp_dir.path());
        let entry = launcher.prepare(&config).unwrap();

        assert_eq!(entry.id(), "demo");
        assert_eq!(
            runner.command_lines(),
            vec!["node --version".to_string(), "npm --version".to_string()]
        );
        assert!(!temp_dir.path().join("dist/index.js").exists());
    }

    #[test]
    fn test_prepare_propagates_build_failure() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeCommandRunner::new().with_exit_code("npm install", 1);
        let browser = FakeBrowser::new();
        let launcher = Launcher::new(&runner, &browser, LauncherSettings::default());

        let config = ServerConfig::new(0, temp_dir.path());
        let result = launcher.prepare(&config);

        assert!(matches!(result, Err(LaunchError::BuildFailed { .. })));
        assert_eq!(finish(result.map(|_| ServeOutcome::Interrupted)), 1);
    }

    #[tokio::test]
    async fn test_launch_opens_browser_once() {
        let temp_dir = built_root();
        let runner = FakeCommandRunner::new();
        let browser = FakeBrowser::new();
        let launcher = Launcher::new(&runner, &browser, LauncherSettings::default());

        let config = ServerConfig::new(0, temp_dir.path()).with_example("line");
        let outcome = launcher.launch(&config, async {}).await.unwrap();

        assert_eq!(outcome, ServeOutcome::Interrupted);
        let opened = browser.opened();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("http://localhost:"));
        assert!(opened[0].ends_with("/examples/line-chart.html"));
    }

    #[tokio::test]
    async fn test_browser_failure_is_not_fatal() {
        let temp_dir = built_root();
        let runner = FakeCommandRunner::new();
        let browser = FakeBrowser::failing();
        let launcher = Launcher::new(&runner, &browser, LauncherSettings::default());

        let config = ServerConfig::new(0, temp_dir.path());
        let result = launcher.launch(&config, async {}).await;

        assert_eq!(finish(result), 0);
        assert_eq!(browser.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_no_browser_flag() {
        let temp_dir = built_root();
        let runner = FakeCommandRunner::new();
        let browser = FakeBrowser::new();
        let launcher = Launcher::new(&runner, &browser, LauncherSettings::default());

        let config = ServerConfig::new(0, temp_dir.path()).without_browser();
        launcher.launch(&config, async {}).await.unwrap();

        assert!(browser.opened().is_empty());
    }
}

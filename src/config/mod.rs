pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::ServerConfig;
#[cfg(feature = "cli")]
use crate::utils::error::{LaunchError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dataviz-launcher")]
#[command(about = "Build, serve and open the Open DataViz demos locally")]
#[command(after_help = "Examples:
  dataviz-launcher                      # Start server with main demo
  dataviz-launcher --port 3000          # Use port 3000
  dataviz-launcher --example line       # Open line chart example
  dataviz-launcher --list               # List all examples")]
pub struct CliConfig {
    /// Port number for the HTTP server
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Example to open: demo, line, bar, scatter or pie
    #[arg(long, value_name = "EXAMPLE")]
    pub example: Option<String>,

    /// List all available examples and exit
    #[arg(long)]
    pub list: bool,

    /// Project root to build and serve
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// TOML file describing the toolchain and build output
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not open a browser window
    #[arg(long)]
    pub no_browser: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 解析專案根目錄並產生伺服器設定
    pub fn server_config(&self) -> Result<ServerConfig> {
        self.validate()?;

        let root = self.root.canonicalize().map_err(|e| LaunchError::ConfigError {
            message: format!("project root '{}' is not accessible: {}", self.root.display(), e),
        })?;

        if !root.is_dir() {
            return Err(LaunchError::ConfigError {
                message: format!("project root '{}' is not a directory", root.display()),
            });
        }

        Ok(ServerConfig {
            port: self.port,
            example: self.example.clone(),
            root,
            open_browser: !self.no_browser,
        })
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        validation::validate_path("root", &self.root)?;
        if let Some(config) = &self.config {
            validation::validate_path("config", config)?;
        }
        Ok(())
    }
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{SystemBrowser, SystemCommandRunner};
pub use config::toml_config::LauncherSettings;
pub use crate::core::{
    builder::BuildOrchestrator, launcher::Launcher, prober::DependencyProber, resolver::resolve,
    server::DevServer,
};
pub use utils::error::{LaunchError, Result};

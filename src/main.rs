use clap::Parser;
use dataviz_launcher::core::launcher::{run_cli, shutdown_signal};
use dataviz_launcher::utils::logger;
use dataviz_launcher::{CliConfig, SystemBrowser, SystemCommandRunner};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting dataviz-launcher");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let exit_code = run_cli(
        &config,
        SystemCommandRunner::new(),
        SystemBrowser::new(),
        shutdown_signal(),
    )
    .await;

    std::process::exit(exit_code);
}

use clap::Parser;
use catalog_check::app::runner;
use catalog_check::utils::logger;
use catalog_check::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.command.common().verbose);

    tracing::info!("Starting catalog-check");
    tracing::debug!("CLI config: {:?}", config);

    let code = runner::exit_code(runner::run_command(&config.command).await);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

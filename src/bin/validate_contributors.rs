use clap::Parser;
use catalog_check::app::runner;
use catalog_check::utils::logger;
use catalog_check::ContributorsArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ContributorsArgs::parse();
    logger::init_cli_logger(args.common.verbose);

    tracing::info!("🔍 Contributors validation ({})", args.file);

    let code = runner::exit_code(runner::run_contributors(&args).await);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

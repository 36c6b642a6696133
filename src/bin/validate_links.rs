use clap::Parser;
use catalog_check::app::runner;
use catalog_check::utils::logger;
use catalog_check::LinksArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = LinksArgs::parse();
    logger::init_cli_logger(args.common.verbose);

    tracing::info!("🔍 AI tools links validation ({})", args.file);

    let code = runner::exit_code(runner::run_links(&args).await);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

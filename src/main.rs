use anyhow::Context;
use clap::Parser;
use topsis_rank::utils::{logger, validation::Validate};
use topsis_rank::{CliConfig, LocalStorage, RankingEngine, TopsisError, TopsisPipeline};

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    match run(cli) {
        Ok(output_path) => println!("Result saved to {}", output_path),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn run(cli: CliConfig) -> anyhow::Result<String> {
    let config = cli
        .into_run_config()
        .context("failed to resolve settings")?;
    config.validate().context("invalid settings")?;

    let pipeline = TopsisPipeline::new(LocalStorage::default(), config);
    let output_path = RankingEngine::new(pipeline).run()?;
    Ok(output_path)
}

fn report(e: &anyhow::Error) {
    tracing::debug!("Run failed: {:#}", e);

    match e.downcast_ref::<TopsisError>() {
        Some(err) => {
            tracing::info!(category = ?err.category(), "Suggestion: {}", err.recovery_suggestion());
            eprintln!("Error: {}", err.user_friendly_message());
        }
        None => eprintln!("Error: {:#}", e),
    }
}

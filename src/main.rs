use beni::utils::error::BeniError;
use beni::utils::{logger, progress, validation::Validate};
use beni::{CliConfig, EnvironmentEngine, ForgeChecker};
use clap::Parser;
use std::io::Write;

async fn run(config: &CliConfig) -> Result<(), BeniError> {
    config.validate()?;

    let checker = ForgeChecker::from_env()?;
    let engine = EnvironmentEngine::new(checker).with_progress(!progress::is_progress_disabled());

    let yaml = engine.render(config.paths.as_slice(), &config.ignore).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(yaml.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger();
    tracing::debug!("CLI config: {:?}", config);

    match run(&config).await {
        Ok(()) => {}
        Err(e) => {
            tracing::error!("❌ beni failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

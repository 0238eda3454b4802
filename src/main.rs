use clap::Parser;
use quakemap::utils::{logger, validation::Validate};
use quakemap::{CliConfig, LivePipeline, LocalStorage, MapOptions, ViewEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting quakemap CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = LivePipeline::new(storage, config, MapOptions::default());
    let engine = ViewEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Map published successfully!");
            println!("📁 Open in a browser: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Map pipeline failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

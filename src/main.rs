use anyhow::Context;
use clap::Parser;
use flickr_readme::utils::{logger, validation::Validate};
use flickr_readme::{CliConfig, LocalStorage, ReadmePipeline, UpdateEngine, UpdateReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

async fn run(cli: &CliConfig) -> flickr_readme::Result<UpdateReport> {
    let config = cli.resolve()?;
    tracing::debug!("Resolved config: {:?}", config);
    config.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = match cli.seed {
        Some(seed) => ReadmePipeline::with_rng(storage, config, StdRng::seed_from_u64(seed))?,
        None => ReadmePipeline::new(storage, config)?,
    };

    UpdateEngine::new(pipeline).run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_format);
    tracing::info!("Starting flickr-readme");

    match run(&cli).await {
        Ok(report) if report.written => {
            println!("✅ README updated with: {}", report.title);
            println!("   Image URL: {}", report.image_url);
        }
        Ok(report) => {
            std::io::stdout()
                .write_all(report.document.as_bytes())
                .context("failed to print rendered README")?;
        }
        Err(e) => {
            tracing::error!(
                "❌ Update failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            // 依錯誤類別決定退出碼
            let exit_code = if cli.exit_zero { 0 } else { e.exit_code() };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

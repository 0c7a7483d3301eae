//! Sentilyze
//!
//! Classifies typed text or a user's recent posts as positive or negative.

use anyhow::Context;
use clap::Parser;
use sentilyze_classifiers::ResourceLoader;
use sentilyze_demo::app::{analyze_text, analyze_user, load_or_report, run_interactive};
use sentilyze_demo::cli::{Cli, Commands};
use sentilyze_demo::config::DemoConfig;
use sentilyze_demo::source::build_source;
use std::io::Read;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = DemoConfig::load(&cli.config, &cli)?;
    info!("Vectorizer: {:?}", config.resources.vectorizer_path);
    info!("Model: {:?}", config.resources.model_path);

    let loader = ResourceLoader::new(config.resources.clone());
    let Some(resources) = load_or_report(&loader) else {
        return Ok(());
    };

    match cli.command {
        Commands::Analyze { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read text from stdin")?;
                    buf
                }
            };

            let sentiment = analyze_text(&resources, &text)?;
            println!("Sentiment: {}", sentiment);
        }

        Commands::Interactive => {
            let stdin = std::io::stdin();
            let count = run_interactive(&resources, stdin.lock(), std::io::stdout())?;
            info!("Classified {} lines", count);
        }

        Commands::User { username, html, .. } => {
            let source_config = config.source.as_ref().context(
                "No post source configured; pass --source-url or --source-file, or set `source` in the config file",
            )?;
            let source = build_source(source_config)?;

            let report = analyze_user(&resources, source.as_ref(), &username).await?;
            if let Some(warning) = &report.warning {
                eprintln!("{}", warning);
            }
            print!("{}", report.render(html));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("sentilyze=debug,sentilyze_demo=debug,sentilyze_classifiers=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

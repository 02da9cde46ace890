use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formscout::config::Config;
use formscout::llm::LlmProvider;
use formscout::store::{DocumentSource, HttpDocumentSource};
use formscout::wizard::GenerationSession;

#[derive(Parser)]
#[command(name = "formscout")]
#[command(about = "Schema sampling and relationship detection for AI-assisted form generation")]
struct Args {
    /// Collection to sample and build a form for
    #[arg(long)]
    collection: String,

    /// What the generated form is for, in plain language
    #[arg(long, default_value = "a data entry form for this collection")]
    description: String,

    /// Stop after relationship detection and print what was found
    #[arg(long)]
    detect_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let store: Arc<dyn DocumentSource> = Arc::new(HttpDocumentSource::new(&config.store)?);

    if let Some(llm_config) = &config.llm {
        tracing::info!("Using LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - generation disabled, detection still runs");
    }
    let generation_possible = llm.is_available();

    let mut session = GenerationSession::new(store, llm, config.sampling.clone());

    session.sample(&args.collection).await?;
    let relationships = session.detect_relationships().await?;

    if args.detect_only || !generation_possible {
        println!("{}", serde_json::to_string_pretty(relationships)?);
        return Ok(());
    }

    let fields = session.generate(&args.description).await?;
    println!("{}", serde_json::to_string_pretty(fields)?);

    Ok(())
}

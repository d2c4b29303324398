//! `claimsearch` command-line entrypoint: runs one search and prints the ranked claims as JSON.

use std::sync::Arc;

use clap::Parser;
use mimalloc::MiMalloc;

use claimsearch::config::Config;
use claimsearch::embedding::{OpenAiEmbedder, Reranker, RerankerConfig};
use claimsearch::filter::FilterMode;
use claimsearch::retrieval::CandidateRetriever;
use claimsearch::search::{PipelineConfig, SearchPipeline, SearchRequest};
use claimsearch::vectordb::QdrantClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(
    name = "claimsearch",
    about = "Semantic patent claim search with cross-encoder reranking",
    version
)]
struct Cli {
    /// Natural-language query
    query: String,

    /// Classification prefix, e.g. H02J
    #[arg(long, default_value = "")]
    classification: String,

    /// required | preferred | ignored
    #[arg(long, default_value = "ignored")]
    classification_mode: String,

    /// Keyword matched against title and abstract
    #[arg(long, default_value = "")]
    keyword: String,

    /// required | preferred | ignored
    #[arg(long, default_value = "ignored")]
    keyword_mode: String,

    /// Exact patent title
    #[arg(long, default_value = "")]
    title: String,

    /// required | preferred | ignored
    #[arg(long, default_value = "ignored")]
    title_mode: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn request(&self) -> SearchRequest {
        SearchRequest::new(self.query.as_str())
            .classification(
                self.classification.as_str(),
                FilterMode::parse(&self.classification_mode),
            )
            .keyword(self.keyword.as_str(), FilterMode::parse(&self.keyword_mode))
            .title(self.title.as_str(), FilterMode::parse(&self.title_mode))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        qdrant_url = %config.qdrant_url,
        collection = %config.collection_name,
        top_k = config.top_k,
        result_limit = config.result_limit,
        "claimsearch starting"
    );

    let store = QdrantClient::new(&config.qdrant_url).await?;
    store.health_check().await?;
    if !store.collection_exists(&config.collection_name).await? {
        tracing::warn!(collection = %config.collection_name, "Claim collection not found");
    }
    let embedder = OpenAiEmbedder::from_config(&config)?;

    let reranker_config = match &config.reranker_path {
        Some(path) => RerankerConfig {
            model_path: Some(path.clone()),
            ..RerankerConfig::from_env()
        },
        None => {
            tracing::warn!("No CLAIMSEARCH_RERANKER_PATH configured, running reranker in stub mode");
            RerankerConfig::stub()
        }
    };
    let reranker = Arc::new(Reranker::load(reranker_config)?);

    let retriever = CandidateRetriever::new(embedder, store, config.collection_name.clone());
    let pipeline = SearchPipeline::new(retriever, reranker, PipelineConfig::from_config(&config))?;

    let results = pipeline.search(&cli.request()).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{output}");

    Ok(())
}

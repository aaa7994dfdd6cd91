//! DocGraph: PDF-to-knowledge-graph demo server.

use std::path::PathBuf;
use std::sync::Arc;

use docgraph_core::AppConfig;
use docgraph_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("DOCGRAPH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("DocGraph: document to knowledge graph server");
                println!();
                println!("Usage: docgraph");
                println!();
                println!("Environment:");
                println!("  PORT                       HTTP port (default 3003)");
                println!("  DOCGRAPH_DATA_DIR          Data directory (default ./data)");
                println!("  DOCGRAPH_SEED_ON_START     Load the seed ontology (default true)");
                println!("  DOCGRAPH_CONTEXT_CHARS     Context chars per prompt (default 2000)");
                println!("  DOCGRAPH_LLM_TIMEOUT_SECS  LLM request timeout (default 60)");
                println!("  OPENAI_API_KEY / ANTHROPIC_API_KEY / GROQ_API_KEY");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}. Use 'docgraph help' for usage.", other);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = AppConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::new(config)?);
    let stats = state.store.stats();
    info!(
        "Graph ready with {} nodes and {} links",
        stats.node_count, stats.link_count
    );

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("DocGraph server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

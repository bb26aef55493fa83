//! Interactive REPL over an indexed manual corpus

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use manual_rag::config::{api_key_from_env, RagConfig};
use manual_rag::generation::ResponseGenerator;
use manual_rag::memory::ConversationMemory;
use manual_rag::pipeline::RagPipeline;
use manual_rag::providers::{EmbeddingProvider, OpenAiClient, PineconeIndex};
use manual_rag::retrieval::Retriever;

#[derive(Parser)]
#[command(name = "manual-rag-chat", about = "Ask questions about your manuals")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, default_value = "manual-rag.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "manual_rag=warn".into()),
        )
        .init();

    let args = Args::parse();
    let config = RagConfig::load_or_default(&args.config)?;

    let openai_key = api_key_from_env("OPENAI_API_KEY")?;
    let pinecone_key = api_key_from_env("PINECONE_API_KEY")?;

    let client = Arc::new(OpenAiClient::new(
        &config.embedding,
        &config.llm,
        openai_key,
    )?);
    let index = Arc::new(PineconeIndex::new(&config.index, pinecone_key)?);

    let embedder: Arc<dyn EmbeddingProvider> = client.clone();
    let pipeline = RagPipeline::new(
        Retriever::new(embedder, index, config.index.namespace.clone()),
        ResponseGenerator::new(client),
        config.retrieval.top_k,
        config.retrieval.history_turns,
    );

    let mut memory = ConversationMemory::new();

    println!("Ask a question about your manuals (type 'exit' to quit):\n");

    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        match pipeline.answer(&mut memory, query).await {
            Ok(answer) => println!("\nBot: {}\n", answer),
            Err(e) => eprintln!("\nerror: {}\n", e),
        }
    }

    Ok(())
}

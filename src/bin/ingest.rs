//! Offline ingestion: raw extracted pages -> section chunks -> vector index
//!
//! Reads newline-delimited raw page records (the output of the external PDF
//! extraction step), filters and segments them into chunks, writes the
//! chunks as NDJSON, and with `--index` also embeds and upserts them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use manual_rag::config::{api_key_from_env, RagConfig};
use manual_rag::indexing::ChunkStoreBuilder;
use manual_rag::ingestion::{read_raw_pages, write_chunks, NoiseFilter, SectionSegmenter};
use manual_rag::providers::{OpenAiClient, PineconeIndex};

#[derive(Parser)]
#[command(name = "manual-rag-ingest", about = "Segment raw manual pages and build the vector index")]
struct Args {
    /// Raw page NDJSON file (document_id, page_number, text per line)
    #[arg(long)]
    pages: PathBuf,

    /// Output file for chunk NDJSON
    #[arg(long, default_value = "chunks.jsonl")]
    chunks: PathBuf,

    /// Configuration file (TOML)
    #[arg(long, default_value = "manual-rag.toml")]
    config: PathBuf,

    /// Also embed the chunks and upsert them into the vector index
    #[arg(long)]
    index: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "manual_rag=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = RagConfig::load_or_default(&args.config)?;

    let filter = NoiseFilter::new(&config.chunking)?;
    let segmenter = SectionSegmenter::new(&config.chunking)?;

    let pages = read_raw_pages(File::open(&args.pages).with_context(|| {
        format!("cannot open raw pages file {}", args.pages.display())
    })?)?;
    tracing::info!(pages = pages.len(), "loaded raw pages");

    let chunks = segmenter.segment_pages(&filter, &pages);
    tracing::info!(chunks = chunks.len(), "segmented into chunks");

    let mut writer = BufWriter::new(File::create(&args.chunks)?);
    write_chunks(&mut writer, &chunks)?;
    writer.flush()?;
    tracing::info!(path = %args.chunks.display(), "wrote chunk file");

    if args.index {
        let openai_key = api_key_from_env("OPENAI_API_KEY")?;
        let pinecone_key = api_key_from_env("PINECONE_API_KEY")?;

        let embedder = Arc::new(OpenAiClient::new(
            &config.embedding,
            &config.llm,
            openai_key,
        )?);
        let index = Arc::new(PineconeIndex::new(&config.index, pinecone_key)?);

        let builder = ChunkStoreBuilder::new(
            embedder,
            index,
            config.index.namespace.clone(),
            &config.indexing,
        );
        let report = builder.build(&chunks).await?;

        println!(
            "Indexed {}/{} chunks ({} embedding failures, {} failed batches)",
            report.upserted, report.attempted, report.skipped_embedding, report.failed_batches
        );
        if report.failed_batches > 0 {
            println!(
                "Failed batches were saved to {} for retry",
                config.indexing.failed_batch_dir.display()
            );
        }
    }

    Ok(())
}

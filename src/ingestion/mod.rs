//! Document ingestion: noise filtering, section segmentation, chunk interchange

mod noise;
mod segmenter;

pub use noise::NoiseFilter;
pub use segmenter::SectionSegmenter;

use std::io::{BufRead, BufReader, Read, Write};

use crate::error::Result;
use crate::types::{Chunk, RawPage};

/// Write chunks as newline-delimited JSON
pub fn write_chunks<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut *writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Read chunks from newline-delimited JSON or a top-level JSON array
///
/// The format is sniffed on the first non-whitespace byte: `[` means one
/// array-of-objects document, anything else is treated as NDJSON.
pub fn read_chunks<R: Read>(reader: R) -> Result<Vec<Chunk>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;

    let trimmed = contents.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut chunks = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        chunks.push(serde_json::from_str(line)?);
    }
    Ok(chunks)
}

/// Read raw pages from newline-delimited JSON
pub fn read_raw_pages<R: Read>(reader: R) -> Result<Vec<RawPage>> {
    let reader = BufReader::new(reader);
    let mut pages = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        pages.push(serde_json::from_str(line)?);
    }
    Ok(pages)
}

//! Section-aware segmentation of filtered page lines

use regex::Regex;
use std::collections::HashMap;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::{Chunk, RawPage};

use super::noise::NoiseFilter;

/// Splits filtered lines into section-tagged chunks
///
/// Header detection is a cheap, deterministic proxy for document structure:
/// a numeric outline prefix followed by text (e.g. "2.1 Creating a
/// Document") opens a new section. Everything between two headers becomes
/// one chunk tagged with the preceding header's text; content before the
/// first header groups under the default title.
pub struct SectionSegmenter {
    header: Regex,
    default_title: String,
}

impl SectionSegmenter {
    /// Build a segmenter from chunking configuration
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        let header = Regex::new(&config.header_pattern)
            .map_err(|e| Error::config(format!("invalid header pattern: {}", e)))?;

        Ok(Self {
            header,
            default_title: config.default_section_title.clone(),
        })
    }

    /// Segment one page's filtered lines into chunks
    ///
    /// `ordinal` threads through all pages of a document so chunk ordinals
    /// stay unique document-wide; it is advanced once per emitted chunk.
    pub fn segment(
        &self,
        lines: &[String],
        document_id: &str,
        page_number: u32,
        ordinal: &mut u32,
    ) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut title = self.default_title.clone();
        let mut section_lines: Vec<&str> = Vec::new();

        let flush = |title: &str, section_lines: &mut Vec<&str>, ordinal: &mut u32| {
            if section_lines.is_empty() {
                return None;
            }
            let chunk = Chunk {
                source_document: document_id.to_string(),
                section_title: title.to_string(),
                content: section_lines.join("\n"),
                page_number,
                ordinal: *ordinal,
            };
            *ordinal += 1;
            section_lines.clear();
            Some(chunk)
        };

        for line in lines {
            if self.header.is_match(line) {
                chunks.extend(flush(&title, &mut section_lines, &mut *ordinal));
                title = line.trim().to_string();
            } else {
                section_lines.push(line);
            }
        }

        chunks.extend(flush(&title, &mut section_lines, &mut *ordinal));
        chunks
    }

    /// Filter and segment a sequence of raw pages
    ///
    /// Pages whose text filters down to nothing are skipped (extraction
    /// gaps). A next-ordinal counter is kept per document id, so ordinals
    /// stay unique within each document even when pages of different
    /// documents arrive interleaved.
    pub fn segment_pages(&self, filter: &NoiseFilter, pages: &[RawPage]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut ordinals: HashMap<String, u32> = HashMap::new();

        for page in pages {
            let lines = filter.filter(&page.text);
            if lines.is_empty() {
                tracing::debug!(
                    document = %page.document_id,
                    page = page.page_number,
                    "page yielded no text after filtering, skipping"
                );
                continue;
            }

            let ordinal = ordinals.entry(page.document_id.clone()).or_insert(0);
            chunks.extend(self.segment(&lines, &page.document_id, page.page_number, ordinal));
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> SectionSegmenter {
        SectionSegmenter::new(&ChunkingConfig::default()).unwrap()
    }

    fn lines(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn headers_split_into_titled_chunks() {
        let mut ordinal = 0;
        let chunks = segmenter().segment(
            &lines(&["1.0 Setup", "do X", "2.0 Usage", "do Y"]),
            "manual.pdf",
            1,
            &mut ordinal,
        );

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].section_title, "1.0 Setup");
        assert_eq!(chunks[0].content, "do X");
        assert_eq!(chunks[1].section_title, "2.0 Usage");
        assert_eq!(chunks[1].content, "do Y");
        assert_eq!(ordinal, 2);
    }

    #[test]
    fn page_without_headers_is_one_introduction_chunk() {
        let mut ordinal = 0;
        let chunks = segmenter().segment(
            &lines(&["plain text", "more text", "even more"]),
            "manual.pdf",
            3,
            &mut ordinal,
        );

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].section_title, "Introduction");
        assert_eq!(chunks[0].content, "plain text\nmore text\neven more");
        assert_eq!(chunks[0].page_number, 3);
    }

    #[test]
    fn content_before_first_header_groups_under_introduction() {
        let mut ordinal = 0;
        let chunks = segmenter().segment(
            &lines(&["preamble", "1.1 Overview", "body"]),
            "manual.pdf",
            1,
            &mut ordinal,
        );

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].section_title, "Introduction");
        assert_eq!(chunks[0].content, "preamble");
        assert_eq!(chunks[1].section_title, "1.1 Overview");
        assert_eq!(chunks[1].content, "body");
    }

    #[test]
    fn no_empty_chunks_and_line_count_conserved() {
        let input = lines(&[
            "3.2 Printing",
            "select Print",
            "choose a printer",
            "4.0 Exporting",
            "4.1 PDF Export",
            "pick Export as PDF",
        ]);
        let mut ordinal = 0;
        let chunks = segmenter().segment(&input, "manual.pdf", 1, &mut ordinal);

        let non_header_lines = 3;
        let total: usize = chunks.iter().map(|c| c.content.lines().count()).sum();
        assert_eq!(total, non_header_lines);
        for chunk in &chunks {
            assert!(!chunk.content.is_empty());
        }
        // The back-to-back headers 4.0/4.1 produce no chunk for 4.0.
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].section_title, "4.1 PDF Export");
    }

    #[test]
    fn ordinals_are_unique_across_pages_of_one_document() {
        let seg = segmenter();
        let filter = NoiseFilter::new(&ChunkingConfig::default()).unwrap();

        let pages = vec![
            RawPage {
                document_id: "manual.pdf".to_string(),
                page_number: 1,
                text: "1.0 Setup\ninstall it".to_string(),
            },
            RawPage {
                document_id: "manual.pdf".to_string(),
                page_number: 2,
                text: "2.0 Usage\nrun it\n3.0 Teardown\nremove it".to_string(),
            },
        ];

        let chunks = seg.segment_pages(&filter, &pages);
        let ordinals: Vec<u32> = chunks.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);

        let ids: std::collections::HashSet<String> =
            chunks.iter().map(|c| c.vector_id()).collect();
        assert_eq!(ids.len(), chunks.len());
    }

    #[test]
    fn empty_pages_are_skipped() {
        let seg = segmenter();
        let filter = NoiseFilter::new(&ChunkingConfig::default()).unwrap();

        let pages = vec![
            RawPage {
                document_id: "manual.pdf".to_string(),
                page_number: 1,
                text: "Page 1\n\n".to_string(),
            },
            RawPage {
                document_id: "manual.pdf".to_string(),
                page_number: 2,
                text: "real content".to_string(),
            },
        ];

        let chunks = seg.segment_pages(&filter, &pages);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].page_number, 2);
    }

    #[test]
    fn interleaved_documents_keep_ordinals_unique() {
        let seg = segmenter();
        let filter = NoiseFilter::new(&ChunkingConfig::default()).unwrap();

        // Page order is not guaranteed by the interchange format: pages of
        // two documents may arrive interleaved.
        let pages = vec![
            RawPage {
                document_id: "a.pdf".to_string(),
                page_number: 1,
                text: "alpha one".to_string(),
            },
            RawPage {
                document_id: "b.pdf".to_string(),
                page_number: 1,
                text: "beta one".to_string(),
            },
            RawPage {
                document_id: "a.pdf".to_string(),
                page_number: 2,
                text: "alpha two".to_string(),
            },
        ];

        let chunks = seg.segment_pages(&filter, &pages);
        assert_eq!(chunks.len(), 3);

        let ids: std::collections::HashSet<String> =
            chunks.iter().map(|c| c.vector_id()).collect();
        assert_eq!(ids.len(), chunks.len());

        let a_ordinals: Vec<u32> = chunks
            .iter()
            .filter(|c| c.source_document == "a.pdf")
            .map(|c| c.ordinal)
            .collect();
        assert_eq!(a_ordinals, vec![0, 1]);
    }

    #[test]
    fn ordinal_resets_per_document() {
        let seg = segmenter();
        let filter = NoiseFilter::new(&ChunkingConfig::default()).unwrap();

        let pages = vec![
            RawPage {
                document_id: "a.pdf".to_string(),
                page_number: 1,
                text: "alpha".to_string(),
            },
            RawPage {
                document_id: "b.pdf".to_string(),
                page_number: 1,
                text: "beta".to_string(),
            },
        ];

        let chunks = seg.segment_pages(&filter, &pages);
        assert_eq!(chunks[0].vector_id(), "a.pdf-0");
        assert_eq!(chunks[1].vector_id(), "b.pdf-0");
    }
}

//! Boilerplate and footer removal for raw page text

use regex::Regex;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};

/// Line-level noise filter for extracted page text
///
/// Drops blank lines, footer furniture (page numbers, confidentiality
/// markers), and configured legal-boilerplate phrases. Surviving lines keep
/// their original relative order.
pub struct NoiseFilter {
    footer: Regex,
    /// Phrases pre-lowercased for case-insensitive substring matching
    noise_phrases: Vec<String>,
}

impl NoiseFilter {
    /// Build a filter from chunking configuration
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        let footer = Regex::new(&config.footer_pattern)
            .map_err(|e| Error::config(format!("invalid footer pattern: {}", e)))?;

        Ok(Self {
            footer,
            noise_phrases: config
                .noise_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        })
    }

    /// Filter raw page text into clean, trimmed, ordered lines
    pub fn filter(&self, raw: &str) -> Vec<String> {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !self.footer.is_match(line))
            .filter(|line| !self.is_noise_line(line))
            .map(str::to_string)
            .collect()
    }

    fn is_noise_line(&self, line: &str) -> bool {
        let normalized = line.to_lowercase();
        self.noise_phrases
            .iter()
            .any(|phrase| normalized.contains(phrase))
    }
}

//! Word segmentation for Japanese free text
//!
//! Evaluation sheets are written in Japanese, which has no whitespace word
//! boundaries, so tokens come from a statistical segmenter rather than a
//! whitespace split.

use crate::segmenter;

/// Splits text into word-like tokens
///
/// Implementations must be deterministic and never return empty or
/// whitespace-only tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// TinySegmenter-model tokenizer; blank tokens are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct TinySegmenter;

impl Tokenizer for TinySegmenter {
    fn tokenize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        segmenter::segment(text)
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect()
    }
}

/// Whitespace tokenizer, for already-segmented or alphabetic text
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

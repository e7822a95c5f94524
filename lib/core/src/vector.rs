use crate::idf::IdfTable;
use crate::tokenizer::Tokenizer;
use ahash::AHashMap;
use std::cmp::Ordering;

/// Sparse TF-IDF weight vector of one document
///
/// Entries are kept sorted by token so the norm and dot product are summed in
/// a fixed order and give bit-identical results across runs. The Euclidean
/// norm is computed once at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(String, f64)>,
    norm: f64,
}

impl TermVector {
    /// Vectorize a document against a corpus IDF table
    ///
    /// Term frequencies are divided by the document's token count before
    /// being multiplied by IDF. Tokens missing from the table contribute
    /// nothing.
    pub fn from_text<T>(text: &str, idf: &IdfTable, tokenizer: &T) -> Self
    where
        T: Tokenizer + ?Sized,
    {
        let tokens = tokenizer.tokenize(text);
        if tokens.is_empty() {
            return Self::default();
        }

        let total = tokens.len() as f64;
        let mut counts: AHashMap<String, u32> = AHashMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }

        let weights = counts.into_iter().filter_map(|(token, count)| {
            let w = (count as f64 / total) * idf.weight(&token);
            (w != 0.0).then_some((token, w))
        });

        Self::from_weights(weights)
    }

    /// Build from `(token, weight)` pairs; a repeated token keeps its last weight
    fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut entries: Vec<(String, f64)> = weights.into_iter().collect();
        entries.reverse();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { entries, norm }
    }

    #[inline]
    pub fn weight(&self, token: &str) -> f64 {
        self.entries
            .binary_search_by(|(t, _)| t.as_str().cmp(token))
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Number of non-zero entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Dot product by merge-joining the two sorted entry lists
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = &self.entries[i];
            let (tb, wb) = &other.entries[j];
            match ta.cmp(tb) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity, 0.0 when either vector has zero norm
    pub fn cosine(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}

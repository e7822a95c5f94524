//! Corpus-wide inverse document frequency table

use crate::tokenizer::Tokenizer;
use ahash::{AHashMap, AHashSet};

/// Immutable token → IDF weight table
///
/// Built once per corpus version and shared (behind an `Arc`) by every
/// pairwise comparison of a run. There is no way to mutate it after
/// [`IdfTable::build`] returns.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: AHashMap<String, f64>,
    doc_count: usize,
}

impl IdfTable {
    /// Build the table from every document of the corpus
    ///
    /// Each document counts a token at most once. For a token found in
    /// `df` of `n` documents the weight is `ln(n / (df + 1))`.
    pub fn build<T, S>(texts: &[S], tokenizer: &T) -> Self
    where
        T: Tokenizer + ?Sized,
        S: AsRef<str>,
    {
        let doc_count = texts.len();
        let mut doc_freqs: AHashMap<String, u32> = AHashMap::new();

        for text in texts {
            let distinct: AHashSet<String> = tokenizer.tokenize(text.as_ref()).into_iter().collect();
            for token in distinct {
                *doc_freqs.entry(token).or_insert(0) += 1;
            }
        }

        let n = doc_count as f64;
        let weights = doc_freqs
            .into_iter()
            .map(|(token, df)| (token, (n / (df as f64 + 1.0)).ln()))
            .collect();

        Self { weights, doc_count }
    }

    /// IDF weight of a token; tokens outside the corpus vocabulary weigh 0
    #[inline]
    pub fn weight(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.weights.contains_key(token)
    }

    /// Number of documents the table was built from
    #[inline]
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceTokenizer;

    #[test]
    fn test_idf_formula() {
        let docs = ["road bridge", "road river", "tourism"];
        let idf = IdfTable::build(&docs, &WhitespaceTokenizer);

        assert_eq!(idf.doc_count(), 3);
        // road: df = 2 -> ln(3/3) = 0
        assert!(idf.weight("road").abs() < 1e-12);
        // bridge: df = 1 -> ln(3/2)
        assert!((idf.weight("bridge") - (1.5f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_document_presence_not_frequency() {
        let docs = ["road road road", "bridge"];
        let idf = IdfTable::build(&docs, &WhitespaceTokenizer);
        // df(road) = 1 -> ln(2/2) = 0, repetitions do not count
        assert!(idf.weight("road").abs() < 1e-12);
    }

    #[test]
    fn test_unknown_token_weighs_zero() {
        let idf = IdfTable::build(&["road"], &WhitespaceTokenizer);
        assert!(!idf.contains("harbor"));
        assert_eq!(idf.weight("harbor"), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let docs: [&str; 0] = [];
        let idf = IdfTable::build(&docs, &WhitespaceTokenizer);
        assert!(idf.is_empty());
        assert_eq!(idf.doc_count(), 0);
    }

    #[test]
    fn test_build_from_japanese_text() {
        use crate::tokenizer::TinySegmenter;

        let docs = [
            "市道の舗装補修を実施する",
            "橋梁の点検と補修を実施する",
            "観光客誘致のためのプロモーション活動",
        ];
        let idf = IdfTable::build(&docs, &TinySegmenter);

        assert_eq!(idf.doc_count(), 3);
        // の appears in every document
        assert!(idf.weight("の") < 0.0);
        // 補修 in two of three
        assert!(idf.weight("補修").abs() < 1e-12);
        assert!((idf.weight("橋梁") - (1.5f64).ln()).abs() < 1e-12);
        assert!(idf.contains("プロモーション"));
    }

    #[test]
    fn test_ubiquitous_token_is_negative() {
        let docs = ["a b", "a c"];
        let idf = IdfTable::build(&docs, &WhitespaceTokenizer);
        assert!(idf.weight("a") < 0.0);
        assert!(idf.weight("a").is_finite());
    }
}

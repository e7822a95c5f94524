//! Offline precomputation of the similarity index
//!
//! Builds the corpus IDF table once, vectorizes every project once, then ranks
//! every project against every other. Quadratic in corpus size and meant to
//! run once per data refresh, never per request.

use crate::config::SimilarityConfig;
use crate::index::{SimilarEntry, SimilarityIndex};
use crate::scorer::SimilarityScorer;
use budgetsim_core::{Project, ProjectRepository, TermVector, TinySegmenter, Tokenizer};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Progress is logged every this many projects
const PROGRESS_EVERY: usize = 10;

/// Batch driver producing a [`SimilarityIndex`]
#[derive(Clone)]
pub struct Precomputer {
    config: SimilarityConfig,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Precomputer {
    /// Precomputer using the default Japanese segmenter
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            config,
            tokenizer: Arc::new(TinySegmenter),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn run_repository<R: ProjectRepository + ?Sized>(&self, repository: &R) -> SimilarityIndex {
        self.run(repository.all())
    }

    /// Score every project against the whole corpus
    ///
    /// Every project of the corpus gets an entry, possibly empty.
    pub fn run(&self, corpus: &[Project]) -> SimilarityIndex {
        let started = Instant::now();
        let total = corpus.len();
        let top_n = self.config.top_n;
        info!(projects = total, top_n, parallel = self.config.parallel, "Starting similarity precomputation");

        if corpus.is_empty() {
            warn!("Empty corpus, writing an empty similarity index");
        }

        let scorer = SimilarityScorer::for_corpus(corpus, self.tokenizer.clone(), &self.config);
        info!(
            vocabulary = scorer.idf().len(),
            max_log_diff = scorer.max_log_diff(),
            "Corpus statistics built"
        );

        let vectors: Vec<TermVector> = if self.config.parallel {
            corpus.par_iter().map(|p| scorer.vectorize(p)).collect()
        } else {
            corpus.iter().map(|p| scorer.vectorize(p)).collect()
        };

        let done = AtomicUsize::new(0);
        let rank = |idx: usize| -> (String, Vec<SimilarEntry>) {
            let edges = scorer
                .top_similar_prepared(idx, corpus, &vectors, top_n)
                .unwrap_or_default();
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if n == 1 || n % PROGRESS_EVERY == 0 || n == total {
                info!("Processing: {}/{}", n, total);
            }
            debug!(
                id = %corpus[idx].id,
                best = edges.first().map(|e| e.score).unwrap_or(0.0),
                "Ranked project"
            );
            (corpus[idx].id.clone(), edges.into_iter().map(SimilarEntry::from).collect())
        };

        // indexed collect keeps corpus order in both modes
        let ranked: Vec<(String, Vec<SimilarEntry>)> = if self.config.parallel {
            (0..total).into_par_iter().map(rank).collect()
        } else {
            (0..total).map(rank).collect()
        };

        let mut index = SimilarityIndex::new();
        for (id, entries) in ranked {
            if index.contains(&id) {
                warn!(id = %id, "Duplicate project id, keeping the last entry");
            }
            index.insert(id, entries);
        }

        let stats = index.stats();
        info!(
            projects = stats.projects,
            edges = stats.edges,
            avg_best_score = stats.avg_best_score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity precomputation finished"
        );
        index
    }
}

impl Default for Precomputer {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

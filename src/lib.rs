//! # budgetsim
//!
//! Similar-project recommendations for municipal budget-evaluation records.
//!
//! Every project of an evaluation dataset is compared with every other on
//! four axes (policy hierarchy, TF-IDF text, financial scale, organisational
//! attributes). The top matches are precomputed offline into a
//! `similarities.json` index, and the site only looks them up.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! budgetsim generate --projects data/projects.json --output data/similarities.json
//! budgetsim similar P001 --projects data/projects.json --index data/similarities.json
//! budgetsim explain P001 P002 --projects data/projects.json
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use budgetsim::prelude::*;
//!
//! let store = load_store("data/projects.json")?;
//! let index = Precomputer::new(SimilarityConfig::default()).run_repository(&store);
//! IndexFile::new("data/similarities.json").save(&index)?;
//!
//! let reader = SimilarityIndexReader::new(store, index)?;
//! for similar in reader.get_similar("P001", 5)? {
//!     println!("{} {:.3}", similar.name, similar.score);
//! }
//! # Ok::<(), budgetsim::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - [`budgetsim-core`](https://docs.rs/budgetsim-core) - Project model, repository, tokenizer, IDF, TF-IDF vectors
//! - [`budgetsim-similarity`](https://docs.rs/budgetsim-similarity) - Axis scorers, weights, top-N, precomputation
//! - [`budgetsim-storage`](https://docs.rs/budgetsim-storage) - Dataset loading, index files, index reader

// Re-export core types
pub use budgetsim_core::{
    Error, Result,
    Project, ProjectDataset, HierarchyNode, YearlyFinancial, Evaluation,
    ProjectRepository, ProjectStore,
    Tokenizer, TinySegmenter, WhitespaceTokenizer,
    IdfTable, TermVector,
};

// Re-export similarity engine
pub use budgetsim_similarity::{
    Axis, AxisScores, SimilarityWeights, WeightError,
    SimilarityConfig, FinancialConfig,
    SimilarityScorer, SimilarityEdge, ExplainedPair,
    SimilarityIndex, SimilarEntry, IndexStats,
    Precomputer,
};

// Re-export storage
pub use budgetsim_storage::{IndexFile, SimilarityIndexReader, SimilarProjectDisplay, load_dataset, load_store};

/// Pure scoring functions
pub mod scoring {
    pub use budgetsim_similarity::{
        attribute_similarity, combine, cost_similarity, financial_similarity,
        hierarchy_similarity, select_top, text_similarity, top_similar, vector_similarity,
    };
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Error, Result,
        Project, ProjectRepository, ProjectStore, TinySegmenter,
        SimilarityWeights, SimilarityConfig, SimilarityScorer, SimilarityIndex,
        Precomputer, ExplainedPair,
        IndexFile, SimilarityIndexReader, load_store,
    };
}

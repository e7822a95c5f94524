//! # budgetsim Core
//!
//! Core library for the budgetsim similar-project engine.
//!
//! This crate provides the data model and the text statistics every
//! similarity run is built on:
//!
//! - [`Project`] - One budget-evaluation record with hierarchy, text, financials
//! - [`ProjectRepository`] / [`ProjectStore`] - Read-only record access
//! - [`Tokenizer`] / [`TinySegmenter`] - Japanese word segmentation (see [`segmenter`])
//! - [`IdfTable`] - Corpus-wide inverse document frequency
//! - [`TermVector`] - Sparse TF-IDF document vector with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use budgetsim_core::{IdfTable, TermVector, TinySegmenter};
//!
//! let texts = ["市道の舗装補修を実施する", "橋梁の点検と補修を実施する", "観光客誘致のためのプロモーション"];
//! let idf = IdfTable::build(&texts, &TinySegmenter);
//!
//! let a = TermVector::from_text(texts[0], &idf, &TinySegmenter);
//! let b = TermVector::from_text(texts[1], &idf, &TinySegmenter);
//! let sim = a.cosine(&b);
//! assert!(sim.is_finite());
//! ```

pub mod error;
pub mod project;
pub mod repository;
pub mod segmenter;
pub mod tokenizer;
pub mod idf;
pub mod vector;

pub use error::{Error, Result};
pub use project::{
    Evaluation, EvaluationComment, HierarchyNode, Project, ProjectDataset, ProjectPeriod,
    YearlyFinancial,
};
pub use repository::{ProjectRepository, ProjectStore};
pub use tokenizer::{TinySegmenter, Tokenizer, WhitespaceTokenizer};
pub use idf::IdfTable;
pub use vector::TermVector;

//! # budgetsim Similarity
//!
//! A four-axis similarity engine for budget-evaluation projects.
//!
//! Two projects are compared on independent axes, each scored in [0, 1]:
//!
//! - **Hierarchy**: deepest shared node of the policy / measure / basic-project tree
//! - **Text**: cosine similarity of TF-IDF vectors over overview, target and intent
//! - **Financial**: log-scale closeness of the latest-year total cost
//! - **Attribute**: partial credit for department, category and future direction
//!
//! The axis scores are merged by validated [`SimilarityWeights`]. The
//! [`Precomputer`] ranks every project against the whole corpus offline and
//! emits a [`SimilarityIndex`] that the serving side only looks up.
//!
//! ## Example
//!
//! ```rust
//! use budgetsim_core::{HierarchyNode, Project};
//! use budgetsim_similarity::{Precomputer, SimilarityConfig};
//!
//! let project = |id: &str, basic: &str, overview: &str| Project {
//!     id: id.to_string(),
//!     policy: HierarchyNode::new("POL1", "安全・安心なまちづくり"),
//!     measure: HierarchyNode::new("MES1", "道路整備"),
//!     basic_project: HierarchyNode::new(basic, ""),
//!     overview: overview.to_string(),
//!     ..Default::default()
//! };
//! let corpus = vec![
//!     project("P001", "BP1", "市道の舗装補修を実施する"),
//!     project("P002", "BP2", "橋梁の点検と補修を実施する"),
//! ];
//!
//! let index = Precomputer::new(SimilarityConfig::default()).run(&corpus);
//! assert_eq!(index.get("P001").unwrap()[0].id, "P002");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Corpus    │────>│  IdfTable   │────>│ TermVectors │
//! │ (projects)  │     │ (built once)│     │ (per record)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐           │
//!       └─────────────>│   Scorer    │<──────────┘
//!                      │ (4 axes, N) │
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │   Index     │
//!                      │ (top-N map) │
//!                      └─────────────┘
//! ```

pub mod weights;
pub mod axis;
pub mod config;
pub mod scorer;
pub mod explain;
pub mod index;
pub mod pipeline;

// Re-export main types for convenience
pub use weights::{combine, Axis, AxisScores, SimilarityWeights, WeightError};
pub use axis::{
    attribute_similarity, cost_similarity, financial_similarity, hierarchy_similarity,
    text_similarity, vector_similarity, DEFAULT_MAX_LOG_DIFF,
};
pub use config::{FinancialConfig, SimilarityConfig, DEFAULT_TOP_N};
pub use scorer::{select_top, top_similar, SimilarityEdge, SimilarityScorer};
pub use explain::ExplainedPair;
pub use index::{IndexStats, SimilarEntry, SimilarityIndex};
pub use pipeline::Precomputer;

//! Four-axis project scorer and top-N selection
//!
//! Assembles the axis functions into one weighted score and ranks a target
//! project against a corpus.

use crate::axis::{attribute_similarity, cost_similarity, hierarchy_similarity, vector_similarity};
use crate::config::SimilarityConfig;
use crate::weights::{AxisScores, SimilarityWeights};
use budgetsim_core::{IdfTable, Project, TermVector, Tokenizer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Scored relation from one project to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityEdge {
    pub source_id: String,
    pub target_id: String,
    pub score: f64,
}

/// Scorer holding the corpus statistics shared by every comparison
#[derive(Clone)]
pub struct SimilarityScorer {
    idf: Arc<IdfTable>,
    tokenizer: Arc<dyn Tokenizer>,
    weights: SimilarityWeights,
    max_log_diff: f64,
}

impl fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("vocabulary", &self.idf.len())
            .field("documents", &self.idf.doc_count())
            .field("weights", &self.weights)
            .field("max_log_diff", &self.max_log_diff)
            .finish_non_exhaustive()
    }
}

impl SimilarityScorer {
    pub fn new(
        idf: Arc<IdfTable>,
        tokenizer: Arc<dyn Tokenizer>,
        weights: SimilarityWeights,
        max_log_diff: f64,
    ) -> Self {
        Self {
            idf,
            tokenizer,
            weights,
            max_log_diff,
        }
    }

    /// Build the IDF table over `corpus` once and wrap it in a scorer
    pub fn for_corpus(corpus: &[Project], tokenizer: Arc<dyn Tokenizer>, config: &SimilarityConfig) -> Self {
        let texts: Vec<String> = corpus.iter().map(Project::similarity_text).collect();
        let idf = IdfTable::build(&texts, &*tokenizer);
        Self::new(
            Arc::new(idf),
            tokenizer,
            config.weights,
            config.financial.resolve(corpus),
        )
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    pub fn max_log_diff(&self) -> f64 {
        self.max_log_diff
    }

    /// Same corpus statistics, different weights
    pub fn with_weights(&self, weights: SimilarityWeights) -> Self {
        Self {
            weights,
            ..self.clone()
        }
    }

    pub fn vectorize(&self, project: &Project) -> TermVector {
        TermVector::from_text(&project.similarity_text(), &self.idf, &*self.tokenizer)
    }

    /// Raw axis scores using already-built text vectors
    pub fn axis_scores_with(
        &self,
        a: &Project,
        a_vec: &TermVector,
        b: &Project,
        b_vec: &TermVector,
    ) -> AxisScores {
        AxisScores {
            hierarchy: hierarchy_similarity(a, b),
            text: vector_similarity(a_vec, b_vec),
            financial: cost_similarity(a.latest_total_cost(), b.latest_total_cost(), self.max_log_diff),
            attribute: attribute_similarity(a, b),
        }
    }

    pub fn axis_scores(&self, a: &Project, b: &Project) -> AxisScores {
        self.axis_scores_with(a, &self.vectorize(a), b, &self.vectorize(b))
    }

    /// Combined similarity in [0, 1]
    pub fn score(&self, a: &Project, b: &Project) -> f64 {
        self.weights.combine(&self.axis_scores(a, b))
    }

    /// Rank every other project of `corpus` against `target`
    ///
    /// Projects sharing the target's id are excluded. Returns at most `n`
    /// edges sorted by descending score; ties keep corpus order.
    pub fn top_similar(&self, target: &Project, corpus: &[Project], n: usize) -> Vec<SimilarityEdge> {
        let target_vec = self.vectorize(target);
        let edges = corpus
            .iter()
            .filter(|candidate| candidate.id != target.id)
            .map(|candidate| {
                let scores = self.axis_scores_with(target, &target_vec, candidate, &self.vectorize(candidate));
                self.edge(target, candidate, &scores)
            })
            .collect();
        select_top(edges, n)
    }

    /// [`top_similar`](Self::top_similar) over a corpus whose vectors are
    /// already built (`vectors[i]` belongs to `corpus[i]`)
    ///
    /// Returns `None` when the two slices differ in length or `target_idx`
    /// is out of range.
    pub fn top_similar_prepared(
        &self,
        target_idx: usize,
        corpus: &[Project],
        vectors: &[TermVector],
        n: usize,
    ) -> Option<Vec<SimilarityEdge>> {
        if corpus.len() != vectors.len() {
            return None;
        }
        let target = corpus.get(target_idx)?;
        let target_vec = vectors.get(target_idx)?;
        let edges = corpus
            .iter()
            .zip(vectors)
            .filter(|(candidate, _)| candidate.id != target.id)
            .map(|(candidate, candidate_vec)| {
                let scores = self.axis_scores_with(target, target_vec, candidate, candidate_vec);
                self.edge(target, candidate, &scores)
            })
            .collect();
        Some(select_top(edges, n))
    }

    fn edge(&self, source: &Project, target: &Project, scores: &AxisScores) -> SimilarityEdge {
        SimilarityEdge {
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            score: self.weights.combine(scores),
        }
    }
}

/// Stable sort by descending score, then truncate to `n`
pub fn select_top(mut edges: Vec<SimilarityEdge>, n: usize) -> Vec<SimilarityEdge> {
    edges.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    edges.truncate(n);
    edges
}

/// Free-function form of [`SimilarityScorer::top_similar`]
pub fn top_similar(
    target: &Project,
    corpus: &[Project],
    n: usize,
    scorer: &SimilarityScorer,
) -> Vec<SimilarityEdge> {
    scorer.top_similar(target, corpus, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetsim_core::{HierarchyNode, WhitespaceTokenizer, YearlyFinancial};

    fn project(id: &str, measure: &str, text: &str, cost: f64) -> Project {
        Project {
            id: id.to_string(),
            policy: HierarchyNode::new("POL1", ""),
            measure: HierarchyNode::new(measure, ""),
            basic_project: HierarchyNode::new(format!("BP-{id}"), ""),
            department: "dept".into(),
            overview: text.to_string(),
            financials: vec![YearlyFinancial {
                grand_total: cost,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn corpus() -> Vec<Project> {
        vec![
            project("A", "M1", "road repair pavement", 1000.0),
            project("B", "M1", "bridge repair inspection", 1100.0),
            project("C", "M2", "tourism promotion event", 90_000.0),
            project("D", "M2", "harbor dredging", 5.0),
        ]
    }

    fn scorer(corpus: &[Project]) -> SimilarityScorer {
        SimilarityScorer::for_corpus(corpus, Arc::new(WhitespaceTokenizer), &SimilarityConfig::default())
    }

    #[test]
    fn test_self_similarity_near_max() {
        let corpus = corpus();
        let scorer = scorer(&corpus);
        for p in &corpus {
            assert!(scorer.score(p, p) > 0.95, "self score of {} too low", p.id);
        }
    }

    #[test]
    fn test_scores_in_unit_range() {
        let corpus = corpus();
        let scorer = scorer(&corpus);
        for a in &corpus {
            for b in &corpus {
                let s = scorer.score(a, b);
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_top_similar_excludes_self() {
        let corpus = corpus();
        let scorer = scorer(&corpus);
        let result = scorer.top_similar(&corpus[0], &corpus, 10);
        assert_eq!(result.len(), corpus.len() - 1);
        assert!(result.iter().all(|e| e.target_id != "A" && e.source_id == "A"));
    }

    #[test]
    fn test_top_similar_truncates_and_sorts() {
        let corpus = corpus();
        let scorer = scorer(&corpus);
        let result = top_similar(&corpus[0], &corpus, 2, &scorer);
        assert_eq!(result.len(), 2);
        assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(result[0].target_id, "B");
    }

    #[test]
    fn test_prepared_matches_live() {
        let corpus = corpus();
        let scorer = scorer(&corpus);
        let vectors: Vec<_> = corpus.iter().map(|p| scorer.vectorize(p)).collect();
        for (idx, p) in corpus.iter().enumerate() {
            assert_eq!(
                scorer.top_similar(p, &corpus, 3),
                scorer.top_similar_prepared(idx, &corpus, &vectors, 3).unwrap()
            );
        }
    }

    #[test]
    fn test_prepared_rejects_mismatched_inputs() {
        let corpus = corpus();
        let scorer = scorer(&corpus);
        let vectors: Vec<_> = corpus.iter().map(|p| scorer.vectorize(p)).collect();

        assert!(scorer.top_similar_prepared(corpus.len(), &corpus, &vectors, 3).is_none());
        assert!(scorer.top_similar_prepared(0, &corpus, &vectors[..2], 3).is_none());
        assert!(scorer.top_similar_prepared(0, &[], &[], 3).is_none());
    }

    #[test]
    fn test_select_top_stable_ties() {
        let edge = |t: &str, score| SimilarityEdge {
            source_id: "S".into(),
            target_id: t.into(),
            score,
        };
        let ranked = select_top(vec![edge("x", 0.5), edge("y", 0.9), edge("z", 0.5), edge("w", 0.5)], 3);
        let ids: Vec<_> = ranked.iter().map(|e| e.target_id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_with_weights_changes_ranking() {
        let corpus = corpus();
        let base = scorer(&corpus);
        let financial_only = base.with_weights(SimilarityWeights::new(0.0, 0.0, 1.0, 0.0).unwrap());

        // D (cost 5) is far from A (cost 1000) financially, C (90000) less so
        let result = financial_only.top_similar(&corpus[0], &corpus, 3);
        assert_eq!(result[0].target_id, "B");
        assert_eq!(result[1].target_id, "C");
    }

    #[test]
    fn test_edge_wire_names() {
        let edge = SimilarityEdge {
            source_id: "A".into(),
            target_id: "B".into(),
            score: 0.5,
        };
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["sourceId"], "A");
        assert_eq!(value["targetId"], "B");
        assert!(value.get("source_id").is_none());
    }

    #[test]
    fn test_empty_text_self_score() {
        // no text vector, so only hierarchy, financial and attribute count
        let mut corpus = corpus();
        corpus.push(project("E", "M3", "", 10.0));
        let scorer = scorer(&corpus);
        let empty = &corpus[4];

        assert!(scorer.vectorize(empty).is_empty());
        assert_eq!(scorer.axis_scores(empty, empty).text, 0.0);
        assert!((scorer.score(empty, empty) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_single_record_corpus() {
        let corpus = vec![project("A", "M1", "road", 1.0)];
        let scorer = scorer(&corpus);
        assert!(scorer.top_similar(&corpus[0], &corpus, 5).is_empty());
    }
}

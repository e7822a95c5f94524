//! Per-axis similarity functions
//!
//! Every function returns a score in [0.0, 1.0] where 1.0 means identical.
//! Missing data never fails: it degrades to a zero contribution.

use budgetsim_core::{IdfTable, Project, TermVector, Tokenizer};

/// Default maximum log-difference of the financial axis
///
/// Roughly `ln(10^10)`, the spread between 1 and 10 billion.
pub const DEFAULT_MAX_LOG_DIFF: f64 = 23.0;

pub const BASIC_PROJECT_MATCH: f64 = 1.0;
pub const MEASURE_MATCH: f64 = 0.7;
pub const POLICY_MATCH: f64 = 0.3;

pub const DEPARTMENT_CREDIT: f64 = 0.4;
pub const CATEGORY_CREDIT: f64 = 0.3;
pub const FUTURE_DIRECTION_CREDIT: f64 = 0.3;

/// Policy hierarchy closeness
///
/// Checked deepest level first; the first matching level decides the score.
pub fn hierarchy_similarity(a: &Project, b: &Project) -> f64 {
    if a.basic_project.id == b.basic_project.id {
        BASIC_PROJECT_MATCH
    } else if a.measure.id == b.measure.id {
        MEASURE_MATCH
    } else if a.policy.id == b.policy.id {
        POLICY_MATCH
    } else {
        0.0
    }
}

/// Cosine similarity of two TF-IDF vectors built against the same table
pub fn vector_similarity(a: &TermVector, b: &TermVector) -> f64 {
    a.cosine(b).clamp(0.0, 1.0)
}

/// Text similarity of two projects (overview, target, intent)
///
/// Vectorizes both texts on every call; bulk callers should vectorize once
/// and use [`vector_similarity`].
pub fn text_similarity<T>(a: &Project, b: &Project, idf: &IdfTable, tokenizer: &T) -> f64
where
    T: Tokenizer + ?Sized,
{
    let va = TermVector::from_text(&a.similarity_text(), idf, tokenizer);
    let vb = TermVector::from_text(&b.similarity_text(), idf, tokenizer);
    vector_similarity(&va, &vb)
}

/// Log-scale closeness of two cost figures
///
/// # Arguments
/// * `a`, `b` - Latest total costs, `None` when a record has no financial data
/// * `max_log_diff` - Log-difference at which the score bottoms out at 0
pub fn cost_similarity(a: Option<f64>, b: Option<f64>, max_log_diff: f64) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return 0.0,
    };

    if a == b {
        return 1.0;
    }
    if max_log_diff <= 0.0 {
        return 0.0;
    }

    let log_diff = ((a + 1.0).ln() - (b + 1.0).ln()).abs();
    let score = 1.0 - log_diff / max_log_diff;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Financial scale closeness of two projects' latest-year total cost
pub fn financial_similarity(a: &Project, b: &Project, max_log_diff: f64) -> f64 {
    cost_similarity(a.latest_total_cost(), b.latest_total_cost(), max_log_diff)
}

/// Organisation / attribute overlap
///
/// Independent partial credit: department 0.4, category 0.3, future
/// direction 0.3.
pub fn attribute_similarity(a: &Project, b: &Project) -> f64 {
    let mut score = 0.0;
    if a.department == b.department {
        score += DEPARTMENT_CREDIT;
    }
    if a.category == b.category {
        score += CATEGORY_CREDIT;
    }
    if a.evaluation.future_direction == b.evaluation.future_direction {
        score += FUTURE_DIRECTION_CREDIT;
    }
    score
}

/// Log-difference spanned by the costs present in a corpus
///
/// Returns `None` when fewer than two distinct costs exist.
pub fn corpus_max_log_diff<'a, I>(projects: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for cost in projects.into_iter().filter_map(Project::latest_total_cost) {
        if cost.is_finite() && cost >= 0.0 {
            min = min.min(cost);
            max = max.max(cost);
        }
    }
    if !min.is_finite() || max <= min {
        return None;
    }
    Some((max + 1.0).ln() - (min + 1.0).ln())
}

//! Precomputed similarity index
//!
//! The persisted artifact: for every project id, an ordered list of its most
//! similar peers (`id` + `score` only), keyed in corpus order. Serialized as
//! `{ "generatedAt": ISO-8601, "similarities": { id: [{id, score}, ...] } }`.

use crate::scorer::SimilarityEdge;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// One recommendation stored in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarEntry {
    pub id: String,
    pub score: f64,
}

impl From<SimilarityEdge> for SimilarEntry {
    fn from(edge: SimilarityEdge) -> Self {
        Self {
            id: edge.target_id,
            score: edge.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityIndex {
    #[serde(with = "iso8601")]
    pub generated_at: DateTime<Utc>,
    pub similarities: IndexMap<String, Vec<SimilarEntry>>,
}

impl SimilarityIndex {
    /// Empty index stamped with the current time (millisecond precision)
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now())
    }

    pub fn with_timestamp(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: truncate_to_millis(generated_at),
            similarities: IndexMap::new(),
        }
    }

    /// Add or replace an entry; a replaced id keeps its original position
    pub fn insert(&mut self, id: String, entries: Vec<SimilarEntry>) {
        self.similarities.insert(id, entries);
    }

    pub fn get(&self, id: &str) -> Option<&[SimilarEntry]> {
        self.similarities.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.similarities.contains_key(id)
    }

    /// Number of indexed projects
    pub fn len(&self) -> usize {
        self.similarities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.similarities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<SimilarEntry>)> {
        self.similarities.iter()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::compute(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for SimilarityIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// `toISOString`-style timestamps: `2024-04-01T09:30:00.000Z`
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Summary statistics for a similarity index
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub projects: usize,
    pub edges: usize,
    /// Projects with no recommendation at all
    pub empty_entries: usize,
    /// Mean of each project's best score
    pub avg_best_score: f64,
    pub max_best_score: f64,
    pub generated_at: String,
}

impl IndexStats {
    pub fn compute(index: &SimilarityIndex) -> Self {
        let best: Vec<f64> = index
            .similarities
            .values()
            .filter_map(|entries| entries.first().map(|e| e.score))
            .collect();

        let avg_best_score = if best.is_empty() {
            0.0
        } else {
            best.iter().sum::<f64>() / best.len() as f64
        };

        Self {
            projects: index.len(),
            edges: index.similarities.values().map(Vec::len).sum(),
            empty_entries: index.len() - best.len(),
            avg_best_score,
            max_best_score: best.iter().copied().fold(0.0, f64::max),
            generated_at: index.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

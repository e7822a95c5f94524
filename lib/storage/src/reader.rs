//! Runtime lookups against a precomputed similarity index
//!
//! The reader never scores anything. It is handed a repository and a loaded
//! index, checks that the two agree, and then serves `get_similar` lookups
//! joined to display fields.

use budgetsim_core::{Error, Project, ProjectRepository, Result};
use budgetsim_similarity::{SimilarEntry, SimilarityIndex};
use serde::Serialize;
use tracing::{debug, warn};

/// Display row for one recommended project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProjectDisplay {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub policy_name: String,
    pub measure_name: String,
    pub department: String,
    /// Latest-year total cost, 0 when the project has no financial data
    pub total_cost: f64,
}

impl SimilarProjectDisplay {
    fn join(entry: &SimilarEntry, project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            score: entry.score,
            policy_name: project.policy.name.clone(),
            measure_name: project.measure.name.clone(),
            department: project.department.clone(),
            total_cost: project.latest_total_cost().unwrap_or(0.0),
        }
    }
}

/// Immutable index + repository pair
#[derive(Debug)]
pub struct SimilarityIndexReader<R> {
    repository: R,
    index: SimilarityIndex,
}

impl<R: ProjectRepository> SimilarityIndexReader<R> {
    /// Pair an index with the repository it was computed from
    ///
    /// Fails with [`Error::StaleIndex`] when any recommendation points at a
    /// project the repository does not know. Projects missing from the index
    /// are only logged; looking them up later fails with
    /// [`Error::NotIndexed`].
    pub fn new(repository: R, index: SimilarityIndex) -> Result<Self> {
        for (source_id, entries) in index.iter() {
            if let Some(dangling) = entries.iter().find(|e| repository.get(&e.id).is_none()) {
                return Err(Error::StaleIndex {
                    source_id: source_id.clone(),
                    target_id: dangling.id.clone(),
                });
            }
            if repository.get(source_id).is_none() {
                warn!(id = %source_id, "Index entry for a project absent from the repository");
            }
        }

        let unindexed = repository
            .all()
            .iter()
            .filter(|p| !index.contains(&p.id))
            .count();
        if unindexed > 0 {
            warn!(
                unindexed,
                generated_at = %index.generated_at,
                "Repository has projects without precomputed similarities, index may be stale"
            );
        }

        Ok(Self::new_unchecked(repository, index))
    }

    /// Pair without the consistency check; dangling references surface as
    /// [`Error::ProjectNotFound`] during lookups
    pub fn new_unchecked(repository: R, index: SimilarityIndex) -> Self {
        Self { repository, index }
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The first `n` precomputed recommendations for `id`, joined to display fields
    pub fn get_similar(&self, id: &str, n: usize) -> Result<Vec<SimilarProjectDisplay>> {
        let entries = self
            .index
            .get(id)
            .ok_or_else(|| Error::NotIndexed(id.to_string()))?;

        let result = entries
            .iter()
            .take(n)
            .map(|entry| {
                self.repository
                    .get(&entry.id)
                    .map(|project| SimilarProjectDisplay::join(entry, project))
                    .ok_or_else(|| Error::ProjectNotFound(entry.id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(id, returned = result.len(), "Similar projects looked up");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetsim_core::{HierarchyNode, ProjectStore, YearlyFinancial};

    fn project(id: &str, name: &str, cost: Option<f64>) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            policy: HierarchyNode::new("POL1", "安全・安心なまちづくり"),
            measure: HierarchyNode::new("MES1", "道路整備"),
            basic_project: HierarchyNode::new(format!("BP-{id}"), ""),
            department: "建設部".into(),
            financials: cost
                .map(|c| {
                    vec![YearlyFinancial {
                        grand_total: c,
                        ..Default::default()
                    }]
                })
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    fn store() -> ProjectStore {
        ProjectStore::new(vec![
            project("P001", "道路維持管理事業", Some(55000.0)),
            project("P002", "橋梁維持管理事業", Some(50000.0)),
            project("P003", "除雪事業", None),
        ])
    }

    fn index() -> SimilarityIndex {
        let mut index = SimilarityIndex::new();
        index.insert(
            "P001".into(),
            vec![
                SimilarEntry { id: "P002".into(), score: 0.8 },
                SimilarEntry { id: "P003".into(), score: 0.4 },
            ],
        );
        index.insert("P002".into(), vec![SimilarEntry { id: "P001".into(), score: 0.8 }]);
        index.insert("P003".into(), vec![SimilarEntry { id: "P001".into(), score: 0.4 }]);
        index
    }

    #[test]
    fn test_get_similar_joins_display_fields() {
        let reader = SimilarityIndexReader::new(store(), index()).unwrap();
        let result = reader.get_similar("P001", 5).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "P002");
        assert_eq!(result[0].name, "橋梁維持管理事業");
        assert_eq!(result[0].measure_name, "道路整備");
        assert_eq!(result[0].total_cost, 50000.0);
        assert_eq!(result[1].total_cost, 0.0);
    }

    #[test]
    fn test_get_similar_takes_first_n() {
        let reader = SimilarityIndexReader::new(store(), index()).unwrap();
        let result = reader.get_similar("P001", 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].score, 0.8);
    }

    #[test]
    fn test_unknown_id_is_error() {
        let reader = SimilarityIndexReader::new(store(), index()).unwrap();
        assert!(matches!(
            reader.get_similar("P999", 5),
            Err(Error::NotIndexed(id)) if id == "P999"
        ));
    }

    #[test]
    fn test_dangling_target_detected_at_load() {
        let mut stale = index();
        stale.insert("P002".into(), vec![SimilarEntry { id: "GONE".into(), score: 0.5 }]);

        assert!(matches!(
            SimilarityIndexReader::new(store(), stale),
            Err(Error::StaleIndex { source_id, target_id }) if source_id == "P002" && target_id == "GONE"
        ));
    }

    #[test]
    fn test_dangling_target_unchecked_fails_lookup() {
        let mut stale = index();
        stale.insert("P002".into(), vec![SimilarEntry { id: "GONE".into(), score: 0.5 }]);

        let reader = SimilarityIndexReader::new_unchecked(store(), stale);
        assert!(matches!(
            reader.get_similar("P002", 5),
            Err(Error::ProjectNotFound(id)) if id == "GONE"
        ));
        assert!(reader.get_similar("P001", 5).is_ok());
    }

    #[test]
    fn test_borrowed_repository() {
        let store = store();
        let reader = SimilarityIndexReader::new(&store, index()).unwrap();
        assert_eq!(reader.get_similar("P003", 5).unwrap()[0].id, "P001");
    }
}

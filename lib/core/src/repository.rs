//! Read-only access to the project corpus

use crate::project::{Project, ProjectDataset};
use ahash::AHashMap;
use std::sync::Arc;

/// Source of project records consumed by the similarity engine
///
/// Implementations are read-only: the engine never mutates records.
pub trait ProjectRepository {
    /// Every record, in corpus order
    fn all(&self) -> &[Project];

    fn get(&self, id: &str) -> Option<&Project>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

impl<T: ProjectRepository + ?Sized> ProjectRepository for &T {
    fn all(&self) -> &[Project] {
        (**self).all()
    }

    fn get(&self, id: &str) -> Option<&Project> {
        (**self).get(id)
    }
}

impl<T: ProjectRepository + ?Sized> ProjectRepository for Arc<T> {
    fn all(&self) -> &[Project] {
        (**self).all()
    }

    fn get(&self, id: &str) -> Option<&Project> {
        (**self).get(id)
    }
}

/// In-memory repository with an id index
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    by_id: AHashMap<String, usize>,
}

impl ProjectStore {
    /// Build a store; on duplicate ids the first record wins lookups
    pub fn new(projects: Vec<Project>) -> Self {
        let mut by_id = AHashMap::with_capacity(projects.len());
        for (idx, project) in projects.iter().enumerate() {
            by_id.entry(project.id.clone()).or_insert(idx);
        }
        Self { projects, by_id }
    }
}

impl From<ProjectDataset> for ProjectStore {
    fn from(dataset: ProjectDataset) -> Self {
        Self::new(dataset.projects)
    }
}

impl ProjectRepository for ProjectStore {
    #[inline]
    fn all(&self) -> &[Project] {
        &self.projects
    }

    #[inline]
    fn get(&self, id: &str) -> Option<&Project> {
        self.by_id.get(id).map(|&idx| &self.projects[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let store = ProjectStore::new(vec![project("P1", "a"), project("P2", "b")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("P2").map(|p| p.name.as_str()), Some("b"));
        assert!(store.get("P3").is_none());
    }

    #[test]
    fn test_preserves_order() {
        let store = ProjectStore::new(vec![project("B", ""), project("A", "")]);
        let ids: Vec<_> = store.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let store = ProjectStore::new(vec![project("P1", "first"), project("P1", "second")]);
        assert_eq!(store.get("P1").unwrap().name, "first");
    }
}

use atomicwrites::{AtomicFile, OverwriteBehavior};
use budgetsim_core::{Error, Result};
use budgetsim_similarity::SimilarityIndex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk location of a similarity index (`similarities.json`)
///
/// Writes go through a temporary file and an atomic rename, so readers never
/// observe a half-written index.
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the index as pretty-printed JSON and replace the file
    pub fn save(&self, index: &SimilarityIndex) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let data = index.to_json_pretty()?;
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(data.as_bytes()))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
            })?;

        info!(path = %self.path.display(), projects = index.len(), "Similarity index written");
        Ok(())
    }

    pub fn load(&self) -> Result<SimilarityIndex> {
        let data = std::fs::read_to_string(&self.path)?;
        let index = SimilarityIndex::from_json(&data)?;
        info!(
            path = %self.path.display(),
            projects = index.len(),
            generated_at = %index.generated_at,
            "Similarity index loaded"
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetsim_similarity::SimilarEntry;

    fn sample() -> SimilarityIndex {
        let mut index = SimilarityIndex::new();
        index.insert(
            "A".into(),
            vec![
                SimilarEntry { id: "B".into(), score: 0.812_345_678_9 },
                SimilarEntry { id: "C".into(), score: 1.0 / 3.0 },
            ],
        );
        index.insert("B".into(), vec![SimilarEntry { id: "A".into(), score: 0.812_345_678_9 }]);
        index.insert("C".into(), vec![]);
        index
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("data").join("similarities.json"));
        assert!(!file.path().exists());

        let index = sample();
        file.save(&index).unwrap();
        assert!(file.path().exists());

        let loaded = file.load().unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn test_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("similarities.json"));

        file.save(&sample()).unwrap();
        let empty = SimilarityIndex::new();
        file.save(&empty).unwrap();

        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = IndexFile::new(dir.path().join("nope.json"));
        assert!(matches!(file.load(), Err(Error::Io(_))));
    }
}

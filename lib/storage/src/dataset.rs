// Loading of the converted project dataset
use budgetsim_core::{ProjectDataset, ProjectStore, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Read a `projects.json` dataset file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<ProjectDataset> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let dataset: ProjectDataset = serde_json::from_reader(reader)?;

    if dataset.total_count != 0 && dataset.total_count != dataset.projects.len() {
        warn!(
            declared = dataset.total_count,
            actual = dataset.projects.len(),
            "Dataset totalCount does not match the number of projects"
        );
    }
    info!(path = %path.display(), projects = dataset.projects.len(), "Loaded project dataset");
    Ok(dataset)
}

/// Read a dataset file straight into an in-memory repository
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<ProjectStore> {
    load_dataset(path).map(ProjectStore::from)
}

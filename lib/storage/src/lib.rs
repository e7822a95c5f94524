pub mod dataset;
pub mod persistence;
pub mod reader;

pub use dataset::{load_dataset, load_store};
pub use persistence::IndexFile;
pub use reader::{SimilarProjectDisplay, SimilarityIndexReader};

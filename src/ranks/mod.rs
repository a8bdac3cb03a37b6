mod dataset;
mod error;
mod load;
mod parse;

pub use dataset::{Dataset, IterationSnapshot};
pub use error::{Result, VisError};
pub use load::load_dataset_file;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::dataset::Dataset;

pub fn load_dataset_file(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rank dataset from {}", path.display()))?;

    let dataset = Dataset::from_json_str(&text)
        .with_context(|| format!("failed to load rank dataset from {}", path.display()))?;

    let (first, last) = dataset.iteration_range();
    info!(
        path = %path.display(),
        snapshots = dataset.snapshot_count(),
        nodes = dataset.node_count(),
        first,
        last,
        "loaded rank dataset"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::ranks::VisError;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rankscope-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn loads_dataset_from_disk() {
        let path = scratch_file(
            "valid.json",
            r#"[{"iteration": 0, "ranks": [0.2, 0.8]}, {"iteration": 1, "ranks": [0.5, 0.5]}]"#,
        );
        let dataset = load_dataset_file(&path).expect("dataset loads");
        assert_eq!(dataset.node_count(), 2);
        assert_eq!(dataset.iteration_range(), (0, 1));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("rankscope-definitely-missing.json");
        let error = load_dataset_file(&path).expect_err("file is missing");
        assert!(format!("{error:#}").contains("rankscope-definitely-missing.json"));
    }

    #[test]
    fn validation_error_is_preserved_in_chain() {
        let path = scratch_file("ragged.json", r#"[{"iteration": 0, "ranks": []}]"#);
        let error = load_dataset_file(&path).expect_err("empty ranks are rejected");
        assert!(matches!(
            error.downcast_ref::<VisError>(),
            Some(VisError::MalformedDataset(_))
        ));
        let _ = fs::remove_file(path);
    }
}

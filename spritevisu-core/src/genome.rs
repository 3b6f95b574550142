use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const META_FILE_NAME: &str = "meta.json";

/// Error type for loading and exporting the genome size reference.
#[derive(Error, Debug)]
pub enum GenomeSizesError {
    /// IO error occurred while reading or writing the reference.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference is not valid JSON or lacks the `chromosomes` mapping.
    #[error("Invalid genome size reference: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for genome size reference operations.
pub type GenomeSizesResult<T> = std::result::Result<T, GenomeSizesError>;

///
/// The genome size reference: chromosome names mapped to their lengths.
///
/// Loaded once from a JSON document with a top-level `chromosomes` object
/// and immutable afterward. Its chromosome set is the universe of names a
/// contact may reference; anything outside it is dropped downstream rather
/// than rejected. Top-level keys other than `chromosomes` are carried
/// through untouched so the exported `meta.json` stays a faithful copy of
/// the reference.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeSizes {
    pub chromosomes: HashMap<String, u64>,

    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl GenomeSizes {
    pub fn from_file(path: &Path) -> GenomeSizesResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let sizes = serde_json::from_reader(reader)?;

        Ok(sizes)
    }

    /// Whether a chromosome name is part of the reference.
    pub fn contains(&self, chrom: &str) -> bool {
        self.chromosomes.contains_key(chrom)
    }

    pub fn size_of(&self, chrom: &str) -> Option<u64> {
        self.chromosomes.get(chrom).copied()
    }

    ///
    /// Write the reference to `meta.json` in the given directory for the
    /// downstream viewer.
    ///
    /// # Arguments
    /// - directory: the output directory, created if absent
    ///
    pub fn export(&self, directory: &Path) -> GenomeSizesResult<()> {
        std::fs::create_dir_all(directory)?;
        let file = File::create(directory.join(META_FILE_NAME))?;
        serde_json::to_writer(file, self)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::io::Write;

    #[fixture]
    fn reference_json() -> &'static str {
        r#"{"chromosomes": {"chr1": 248956422, "chr2": 242193529}, "assembly": "hg38"}"#
    }

    fn write_reference(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("chrom_sizes.json");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        (tempdir, path)
    }

    #[rstest]
    fn test_from_file(reference_json: &str) {
        let (_tempdir, path) = write_reference(reference_json);
        let sizes = GenomeSizes::from_file(&path).unwrap();

        assert_eq!(sizes.chromosomes.len(), 2);
        assert_eq!(sizes.size_of("chr1"), Some(248956422));
        assert_eq!(sizes.contains("chr2"), true);
        assert_eq!(sizes.contains("chrUn"), false);
    }

    #[rstest]
    fn test_from_file_missing_chromosomes_key() {
        let (_tempdir, path) = write_reference(r#"{"sizes": {"chr1": 100}}"#);
        let result = GenomeSizes::from_file(&path);

        assert!(matches!(result, Err(GenomeSizesError::Json(_))));
    }

    #[rstest]
    fn test_from_file_missing_file() {
        let result = GenomeSizes::from_file(Path::new("no/such/file.json"));

        assert!(matches!(result, Err(GenomeSizesError::Io(_))));
    }

    #[rstest]
    fn test_export_round_trips_extra_keys(reference_json: &str) {
        let (_tempdir, path) = write_reference(reference_json);
        let sizes = GenomeSizes::from_file(&path).unwrap();

        let outdir = tempfile::tempdir().unwrap();
        sizes.export(outdir.path()).unwrap();

        let exported = GenomeSizes::from_file(&outdir.path().join(META_FILE_NAME)).unwrap();
        assert_eq!(exported.chromosomes, sizes.chromosomes);
        assert_eq!(exported.extra.get("assembly"), sizes.extra.get("assembly"));
        assert_eq!(
            exported.extra.get("assembly").and_then(|v| v.as_str()),
            Some("hg38")
        );
    }
}

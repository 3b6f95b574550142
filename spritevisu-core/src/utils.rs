use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = if is_gzipped {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::io::{BufRead, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;

    #[rstest]
    fn test_read_plain_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("clusters.tsv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "c1\tchr1:10").unwrap();

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();

        assert_eq!(lines, vec!["c1\tchr1:10".to_string()]);
    }

    #[rstest]
    fn test_read_gzipped_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("clusters.tsv.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        writeln!(encoder, "c1\tchr1:10").unwrap();
        encoder.finish().unwrap();

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();

        assert_eq!(lines, vec!["c1\tchr1:10".to_string()]);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = get_dynamic_reader(Path::new("no/such/clusters.tsv"));

        assert_eq!(result.is_err(), true);
    }
}

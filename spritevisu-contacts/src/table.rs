use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::cluster::{ClusterRead, ReadFormat};
use crate::consts::{READS_DB_NAME, READS_DB_NAME_START_ONLY};

///
/// Relational sink for raw cluster reads.
///
/// Every parsed read is recorded here, independent of the cluster-size
/// filter, so the table is a complete audit log of the input. The schema
/// follows the read format: full-mode rows keep the end coordinate,
/// start-only rows do not. All inserts run inside a single transaction
/// committed by [ReadTable::finish].
///
pub struct ReadTable {
    conn: Connection,
    format: ReadFormat,
    path: PathBuf,
}

impl ReadTable {
    ///
    /// Open (or create) the read database inside the output directory and
    /// make sure the `contacts` table exists.
    ///
    /// # Arguments
    /// - output: the output directory, created if absent
    /// - format: the read encoding, which selects db name and schema
    ///
    pub fn create(output: &Path, format: ReadFormat) -> Result<Self> {
        std::fs::create_dir_all(output).with_context(|| {
            format!(
                "There was an error creating the output directory: {:?}",
                output
            )
        })?;

        let file_name = match format {
            ReadFormat::Full => READS_DB_NAME,
            ReadFormat::StartOnly => READS_DB_NAME_START_ONLY,
        };
        let path = output.join(file_name);
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open read database: {:?}", path))?;

        let schema = match format {
            ReadFormat::Full => {
                "CREATE TABLE IF NOT EXISTS contacts (
                    chromosome TEXT,
                    start INTEGER,
                    end INTEGER,
                    cluster_id TEXT
                )"
            }
            ReadFormat::StartOnly => {
                "CREATE TABLE IF NOT EXISTS contacts (
                    chromosome TEXT,
                    start INTEGER,
                    cluster_id TEXT
                )"
            }
        };
        conn.execute(schema, [])?;
        conn.execute_batch("BEGIN")?;

        Ok(Self { conn, format, path })
    }

    /// Record one read.
    pub fn insert(&self, cluster_id: &str, read: &ClusterRead) -> Result<()> {
        match self.format {
            ReadFormat::Full => {
                let mut stmt = self
                    .conn
                    .prepare_cached("INSERT INTO contacts VALUES (?1, ?2, ?3, ?4)")?;
                stmt.execute(params![read.chrom, read.start, read.end, cluster_id])?;
            }
            ReadFormat::StartOnly => {
                let mut stmt = self
                    .conn
                    .prepare_cached("INSERT INTO contacts VALUES (?1, ?2, ?3)")?;
                stmt.execute(params![read.chrom, read.start, cluster_id])?;
            }
        }

        Ok(())
    }

    /// Commit everything recorded during the pass and close the database.
    pub fn finish(self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .with_context(|| format!("Failed to close read database: {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn read(chrom: &str, start: u64, end: Option<u64>) -> ClusterRead {
        ClusterRead {
            chrom: chrom.to_string(),
            start,
            end,
        }
    }

    #[rstest]
    fn test_full_mode_rows(#[values(1, 3)] inserts: usize) {
        let outdir = tempfile::tempdir().unwrap();
        let table = ReadTable::create(outdir.path(), ReadFormat::Full).unwrap();

        for i in 0..inserts {
            table
                .insert("c1", &read("chr1", 10 + i as u64, Some(20 + i as u64)))
                .unwrap();
        }
        table.finish().unwrap();

        let conn = Connection::open(outdir.path().join(READS_DB_NAME)).unwrap();
        let count: usize = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, inserts);

        let (chrom, start, end, cluster_id): (String, u64, u64, String) = conn
            .query_row(
                "SELECT chromosome, start, end, cluster_id FROM contacts LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!((chrom.as_str(), start, end, cluster_id.as_str()), ("chr1", 10, 20, "c1"));
    }

    #[rstest]
    fn test_start_only_mode_schema() {
        let outdir = tempfile::tempdir().unwrap();
        let table = ReadTable::create(outdir.path(), ReadFormat::StartOnly).unwrap();
        table.insert("c9", &read("chr2", 42, None)).unwrap();
        table.finish().unwrap();

        let conn = Connection::open(outdir.path().join(READS_DB_NAME_START_ONLY)).unwrap();
        let columns: usize = conn
            .query_row("SELECT COUNT(*) FROM pragma_table_info('contacts')", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(columns, 3);

        let (chrom, start, cluster_id): (String, u64, String) = conn
            .query_row("SELECT chromosome, start, cluster_id FROM contacts", [], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .unwrap();
        assert_eq!((chrom.as_str(), start, cluster_id.as_str()), ("chr2", 42, "c9"));
    }
}

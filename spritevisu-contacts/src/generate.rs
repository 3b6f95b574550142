use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use spritevisu_core::genome::GenomeSizes;
use spritevisu_core::utils::get_dynamic_reader;

use crate::cluster::{MalformedReadPolicy, ReadFormat, parse_cluster_line};
use crate::consts::{DEFAULT_MAX_CLUSTER_SIZE, DEFAULT_MIN_CLUSTER_SIZE};
use crate::contacts::ContactStore;
use crate::table::ReadTable;

/// Options for one conversion run, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactOptions {
    pub min_cluster_size: usize,
    pub max_cluster_size: usize,
    pub format: ReadFormat,
    pub on_malformed: MalformedReadPolicy,
}

impl Default for ContactOptions {
    fn default() -> Self {
        Self {
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            max_cluster_size: DEFAULT_MAX_CLUSTER_SIZE,
            format: ReadFormat::Full,
            on_malformed: MalformedReadPolicy::Abort,
        }
    }
}

/// Counters reported after a conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContactSummary {
    /// Clusters that contributed contacts.
    pub clusters: usize,
    /// Clusters outside the size bounds, skipped for contact generation.
    pub skipped_clusters: usize,
    /// Reads recorded in the relational table.
    pub reads: usize,
    /// Read tokens dropped under [MalformedReadPolicy::Skip].
    pub malformed_reads: usize,
    /// Contact lines written across all chromosome-pair files.
    pub contact_lines: usize,
}

///
/// Convert a cluster file into per-chromosome-pair contact files plus a
/// relational table of raw reads.
///
/// One sequential pass: each line is parsed into a cluster, every read is
/// recorded in the read table, and clusters within the size bounds
/// contribute intra- and interchromosomal contacts to the in-memory store,
/// which is flushed to `<chrom1>-<chrom2>.txt` files at the end. The genome
/// size reference is re-exported as `meta.json` for the viewer.
///
/// # Arguments
/// - clusters: path to the input cluster file (plain or gzipped)
/// - genome: the loaded genome size reference
/// - output: output directory, created if absent
/// - options: size bounds, read format, malformed-read policy
///
pub fn generate_contact_files(
    clusters: &Path,
    genome: &GenomeSizes,
    output: &Path,
    options: &ContactOptions,
) -> Result<ContactSummary> {
    std::fs::create_dir_all(output).with_context(|| {
        format!(
            "There was an error creating the output directory: {:?}",
            output
        )
    })?;

    genome
        .export(output)
        .with_context(|| format!("Failed to export genome sizes to: {:?}", output))?;

    let table = ReadTable::create(output, options.format)?;
    let mut store = ContactStore::new();
    let mut summary = ContactSummary::default();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Processing clusters...");

    let reader = get_dynamic_reader(clusters)?;
    for (index, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("There was an error reading line {}", index + 1))?;

        let Some(cluster) = parse_cluster_line(&line, options.format, options.on_malformed)
            .with_context(|| format!("Failed to parse cluster file at line {}", index + 1))?
        else {
            continue;
        };

        // every parsed read lands in the table, size filter or not
        for read in &cluster.reads {
            table.insert(&cluster.id, read)?;
        }
        summary.reads += cluster.reads.len();
        summary.malformed_reads += cluster.malformed_reads;

        let count = cluster.read_count();
        if count < options.min_cluster_size || count > options.max_cluster_size {
            summary.skipped_clusters += 1;
        } else {
            store.add_cluster(genome, &cluster.bins());
            summary.clusters += 1;
        }

        let processed = summary.clusters + summary.skipped_clusters;
        if processed % 10_000 == 0 {
            spinner.set_message(format!("Processed {} clusters", processed));
        }
        spinner.inc(1);
    }

    summary.contact_lines = store.n_contacts();
    store.write_contact_files(output)?;
    table.finish()?;

    spinner.finish_with_message(format!(
        "Done: {} clusters ({} outside size bounds), {} reads recorded, {} contacts",
        summary.clusters + summary.skipped_clusters,
        summary.skipped_clusters,
        summary.reads,
        summary.contact_lines,
    ));

    Ok(summary)
}

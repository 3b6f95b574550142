use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use spritevisu_core::genome::GenomeSizes;

///
/// Accumulator for generated contact lines, keyed by canonical
/// chromosome-pair.
///
/// Grows for the duration of one pass over the cluster file and is written
/// to disk exactly once at the end. Repeated contacts are kept as repeated
/// lines: multiplicity is the heatmap signal. Memory is bounded by the
/// number of generated lines, which is quadratic in cluster size for
/// intrachromosomal pairs.
///
#[derive(Debug, Default)]
pub struct ContactStore {
    lists: HashMap<String, Vec<String>>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Append one contact, canonicalizing the chromosome pair first.
    ///
    /// The pair key always carries the lexicographically smaller chromosome
    /// first; positions swap along with the names so (A,B) and (B,A) land
    /// on the same line under the same key. Contacts naming a chromosome
    /// outside the reference are dropped.
    ///
    pub fn add_contact(
        &mut self,
        genome: &GenomeSizes,
        chrom1: &str,
        start1: u64,
        chrom2: &str,
        start2: u64,
        weight: usize,
    ) {
        if !genome.contains(chrom1) || !genome.contains(chrom2) {
            return;
        }

        let (chrom1, start1, chrom2, start2) = if chrom1 > chrom2 {
            (chrom2, start2, chrom1, start1)
        } else {
            (chrom1, start1, chrom2, start2)
        };

        self.lists
            .entry(format!("{}-{}", chrom1, chrom2))
            .or_default()
            .push(format!("{},{},{}", start1, start2, weight));
    }

    ///
    /// Generate all contacts for one cluster's bins.
    ///
    /// Intrachromosomal: every unordered pair of distinct positions on a
    /// chromosome, weighted by that chromosome's bin count.
    /// Interchromosomal: the full cross product of positions between two
    /// chromosomes, weighted by the sum of both bin counts.
    ///
    /// # Arguments
    /// - genome: the size reference supplying the valid chromosome set
    /// - bins: unique start positions per chromosome for one cluster
    ///
    pub fn add_cluster(&mut self, genome: &GenomeSizes, bins: &HashMap<String, BTreeSet<u64>>) {
        for (chrom, bin_set) in bins {
            let weight = bin_set.len();
            if weight > 1 {
                for (i, start1) in bin_set.iter().enumerate() {
                    for start2 in bin_set.iter().skip(i + 1) {
                        self.add_contact(genome, chrom, *start1, chrom, *start2, weight);
                    }
                }
            }
        }

        if bins.len() > 1 {
            let mut chroms: Vec<&String> = bins.keys().collect();
            chroms.sort();

            for i in 0..chroms.len() {
                for j in (i + 1)..chroms.len() {
                    let bin_set1 = &bins[chroms[i]];
                    let bin_set2 = &bins[chroms[j]];
                    let weight = bin_set1.len() + bin_set2.len();
                    for start1 in bin_set1 {
                        for start2 in bin_set2 {
                            self.add_contact(genome, chroms[i], *start1, chroms[j], *start2, weight);
                        }
                    }
                }
            }
        }
    }

    /// Contact lines accumulated under one pair key.
    pub fn get(&self, pair_key: &str) -> Option<&Vec<String>> {
        self.lists.get(pair_key)
    }

    /// Total number of contact lines across all pair keys.
    pub fn n_contacts(&self) -> usize {
        self.lists.values().map(|lines| lines.len()).sum()
    }

    /// Number of distinct chromosome pairs observed.
    pub fn n_pairs(&self) -> usize {
        self.lists.len()
    }

    ///
    /// Write every pair's accumulated lines to `<chrom1>-<chrom2>.txt` in
    /// the output directory, overwriting existing files.
    ///
    pub fn write_contact_files(&self, output: &Path) -> Result<()> {
        std::fs::create_dir_all(output).with_context(|| {
            format!(
                "There was an error creating the output directory: {:?}",
                output
            )
        })?;

        for (pair_key, lines) in &self.lists {
            let path = output.join(format!("{}.txt", pair_key));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create contact file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(lines.join("\n").as_bytes())?;
            writer.flush()?;
        }

        Ok(())
    }
}

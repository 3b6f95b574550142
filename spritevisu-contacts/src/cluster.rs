use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result, bail};

/// Read token encoding of the input cluster file.
///
/// Chosen once per run; each variant owns its token layout and the schema
/// of the relational read table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFormat {
    /// `<readname>_<chrom>:<start>-<end>`, the current SPRITE pipeline.
    Full,
    /// `<chrom>:<start>`, legacy start-only files.
    StartOnly,
}

/// What to do with a read token that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReadPolicy {
    /// Fail the run on the first malformed token.
    Abort,
    /// Drop the token, keep the rest of the cluster, and count what was
    /// dropped.
    Skip,
}

/// One genomic observation within a cluster.
///
/// The end coordinate is only present in [ReadFormat::Full] input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRead {
    pub chrom: String,
    pub start: u64,
    pub end: Option<u64>,
}

/// A parsed cluster line: identifier plus its reads.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub id: String,
    pub reads: Vec<ClusterRead>,
    /// Tokens dropped under [MalformedReadPolicy::Skip].
    pub malformed_reads: usize,
}

impl ReadFormat {
    ///
    /// Parse one read token into its genomic coordinates.
    ///
    /// Full-mode read names may themselves contain underscores, so the
    /// name/coordinate split happens on the last one.
    ///
    pub fn parse_read(&self, token: &str) -> Result<ClusterRead> {
        match self {
            ReadFormat::Full => {
                let (_, coord) = token
                    .rsplit_once('_')
                    .with_context(|| format!("read token has no name separator: {:?}", token))?;
                let (chrom, span) = coord
                    .split_once(':')
                    .with_context(|| format!("read token has no coordinate: {:?}", token))?;
                let (start, end) = span
                    .split_once('-')
                    .with_context(|| format!("read token has no end position: {:?}", token))?;

                let start: u64 = start
                    .parse()
                    .with_context(|| format!("invalid start position in read: {:?}", token))?;
                let end: u64 = end
                    .parse()
                    .with_context(|| format!("invalid end position in read: {:?}", token))?;

                if chrom.is_empty() {
                    bail!("empty chromosome name in read: {:?}", token);
                }
                if end < start {
                    bail!("read end precedes start: {:?}", token);
                }

                Ok(ClusterRead {
                    chrom: chrom.to_string(),
                    start,
                    end: Some(end),
                })
            }
            ReadFormat::StartOnly => {
                let (chrom, start) = token
                    .split_once(':')
                    .with_context(|| format!("read token has no coordinate: {:?}", token))?;

                let start: u64 = start
                    .parse()
                    .with_context(|| format!("invalid start position in read: {:?}", token))?;

                if chrom.is_empty() {
                    bail!("empty chromosome name in read: {:?}", token);
                }

                Ok(ClusterRead {
                    chrom: chrom.to_string(),
                    start,
                    end: None,
                })
            }
        }
    }
}

///
/// Parse one line of the cluster file.
///
/// The first whitespace-delimited token is the cluster identifier; every
/// remaining token is a read in the given format. Returns `None` for blank
/// lines.
///
/// # Arguments
/// - line: one line of the cluster file
/// - format: the read token encoding
/// - policy: what to do with tokens that fail to parse
///
pub fn parse_cluster_line(
    line: &str,
    format: ReadFormat,
    policy: MalformedReadPolicy,
) -> Result<Option<Cluster>> {
    let mut tokens = line.split_whitespace();
    let Some(id) = tokens.next() else {
        return Ok(None);
    };

    let mut reads = Vec::new();
    let mut malformed_reads = 0;
    for token in tokens {
        match format.parse_read(token) {
            Ok(read) => reads.push(read),
            Err(err) => match policy {
                MalformedReadPolicy::Abort => {
                    return Err(err.context(format!("in cluster {}", id)));
                }
                MalformedReadPolicy::Skip => malformed_reads += 1,
            },
        }
    }

    Ok(Some(Cluster {
        id: id.to_string(),
        reads,
        malformed_reads,
    }))
}

impl Cluster {
    pub fn read_count(&self) -> usize {
        self.reads.len()
    }

    ///
    /// Unique start positions per chromosome.
    ///
    /// Duplicate starts on the same chromosome collapse to a single bin
    /// entry; positions iterate in ascending order.
    ///
    pub fn bins(&self) -> HashMap<String, BTreeSet<u64>> {
        let mut bins: HashMap<String, BTreeSet<u64>> = HashMap::new();
        for read in &self.reads {
            bins.entry(read.chrom.clone()).or_default().insert(read.start);
        }

        bins
    }
}

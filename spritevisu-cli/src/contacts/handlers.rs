use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;

use spritevisu_contacts::consts::{
    DEFAULT_MAX_CLUSTER_SIZE, DEFAULT_MIN_CLUSTER_SIZE, DEFAULT_OUT,
};
use spritevisu_contacts::{
    ContactOptions, MalformedReadPolicy, ReadFormat, generate_contact_files,
};
use spritevisu_core::genome::GenomeSizes;

pub fn run_contacts(matches: &ArgMatches) -> Result<()> {
    let clusters = matches
        .get_one::<String>("clusters")
        .expect("A path to a clusters file is required.");

    let genomic_sizes = matches
        .get_one::<String>("genomic-sizes")
        .expect("A path to a genomic size reference is required.");

    let default_out = DEFAULT_OUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    let max_cluster_size = matches
        .get_one::<usize>("max-cluster-size")
        .copied()
        .unwrap_or(DEFAULT_MAX_CLUSTER_SIZE);

    let min_cluster_size = matches
        .get_one::<usize>("min-cluster-size")
        .copied()
        .unwrap_or(DEFAULT_MIN_CLUSTER_SIZE);

    let format = if matches.get_flag("start-only") {
        ReadFormat::StartOnly
    } else {
        ReadFormat::Full
    };

    let on_malformed = if matches.get_flag("skip-malformed") {
        MalformedReadPolicy::Skip
    } else {
        MalformedReadPolicy::Abort
    };

    let genome = GenomeSizes::from_file(Path::new(genomic_sizes))?;

    let options = ContactOptions {
        min_cluster_size,
        max_cluster_size,
        format,
        on_malformed,
    };
    generate_contact_files(Path::new(clusters), &genome, Path::new(output), &options)?;

    Ok(())
}

use clap::{Arg, ArgAction, Command};

pub const CONTACTS_CMD: &str = "contacts";

pub fn create_contacts_cli() -> Command {
    Command::new(CONTACTS_CMD)
        .about("Convert a clusters file into chromosome-pair contact files for the heatmap viewer.")
        .arg(Arg::new("clusters").help("Path to the input clusters file."))
        .arg(
            Arg::new("genomic-sizes")
                .help("Path to the JSON genomic size reference, e.g. chromsize_hg19.json."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output directory for the generated heatmap files. (default: 'spritevisu')"),
        )
        .arg(
            Arg::new("max-cluster-size")
                .long("max-cluster-size")
                .short('m')
                .value_parser(clap::value_parser!(usize))
                .help("Maximum number of reads allowed in a read-cluster. Larger clusters are skipped. (default: 1000)"),
        )
        .arg(
            Arg::new("min-cluster-size")
                .long("min-cluster-size")
                .short('n')
                .value_parser(clap::value_parser!(usize))
                .help("Minimum number of reads required in a read-cluster. Smaller clusters are skipped. (default: 2)"),
        )
        .arg(
            Arg::new("start-only")
                .long("start-only")
                .action(ArgAction::SetTrue)
                .help("The clusters file contains start positions only (legacy format)."),
        )
        .arg(
            Arg::new("skip-malformed")
                .long("skip-malformed")
                .action(ArgAction::SetTrue)
                .help("Skip read tokens that fail to parse instead of aborting the run."),
        )
}

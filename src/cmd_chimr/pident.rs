use clap::*;
use itertools::Itertools;
use std::io::Write;

use chimr::libs::identity::try_percent_identity;
use chimr::libs::seq::read_aligned;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("pident")
        .about("Pairwise percent identity of aligned sequences")
        .after_help(
            r###"
For every pair of sequences, prints the percent of identical bases among the
columns where at least one of the two has a base.

* Columns where both sides are gaps are ignored
* Comparison is case-sensitive

Examples:
1. All pairs of a file:
   chimr pident tests/chimera/templates.fa

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Aligned FASTA file to process"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let seqs = read_aligned(chimr::reader(args.get_one::<String>("infile").unwrap())?)?;
    let mut writer = chimr::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Output
    //----------------------------
    for (left, right) in seqs.iter().tuple_combinations() {
        let pident = try_percent_identity(left.aligned(), right.aligned())
            .map_err(|e| anyhow::anyhow!("{} vs {}: {}", left.name(), right.name(), e))?;
        writer.write_fmt(format_args!(
            "{}\t{}\t{:.2}\n",
            left.name(),
            right.name(),
            pident
        ))?;
    }

    Ok(())
}

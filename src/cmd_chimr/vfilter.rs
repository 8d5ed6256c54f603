use clap::*;
use std::io::Write;

use chimr::libs::column::ColumnMap;
use chimr::libs::filter::vertical_filter;
use chimr::libs::seq::read_aligned;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("vfilter")
        .about("Removes columns that are gaps in every sequence")
        .after_help(
            r###"
Drops alignment columns where every sequence has `-` or `.`.

* All sequences must have the same aligned length
* `--map` writes which input column each output column came from (0-based)

Examples:
1. Strip all-gap columns:
   chimr vfilter tests/chimera/templates.fa

2. Also write the column map:
   chimr vfilter tests/chimera/templates.fa --map columns.tsv

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
            Arg::new("map")
                .long("map")
                .num_args(1)
                .help("Write the column map to this file"),
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
    let mut seqs = read_aligned(chimr::reader(args.get_one::<String>("infile").unwrap())?)?;
    let mut writer = chimr::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Operating
    //----------------------------
    let Some((first, rest)) = seqs.split_first_mut() else {
        return Ok(());
    };

    if let Some(seq) = rest.iter().find(|seq| seq.len() != first.len()) {
        return Err(anyhow::anyhow!(
            "{}: aligned length {} differs from {}",
            seq.name(),
            seq.len(),
            first.len()
        ));
    }

    let width = first.len();
    let map = vertical_filter(first, rest, &ColumnMap::identity(width));
    log::info!("{} of {} columns kept", map.len(), width);

    //----------------------------
    // Output
    //----------------------------
    for seq in &seqs {
        writer.write_fmt(format_args!(">{}\n", seq.name()))?;
        writer.write_all(seq.aligned())?;
        writer.write_all(b"\n")?;
    }

    if let Some(mapfile) = args.get_one::<String>("map") {
        let mut map_writer = chimr::writer(mapfile)?;
        map_writer.write_fmt(format_args!("#new\toriginal\n"))?;
        for (new, original) in map.as_slice().iter().enumerate() {
            map_writer.write_fmt(format_args!("{}\t{}\n", new, original))?;
        }
    }

    Ok(())
}

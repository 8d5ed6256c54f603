use clap::*;
use rayon::prelude::*;
use std::io::Write;

use chimr::libs::chimera::{CancelToken, ChimeraParams, Classification, Detection, Maligner};
use chimr::libs::search::{build_supplier, SearchMethod};
use chimr::libs::seq::read_aligned;
use chimr::libs::trim::TrimMode;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("detect")
        .about("Detects chimeric sequences against aligned templates")
        .after_help(
            r###"
Decides for each query whether it is better explained as a mosaic of two or
more reference templates than as a copy of a single one.

Queries and templates must share one alignment (equal aligned lengths).

Output is a TSV with one row per parent region of each chimeric query, and a
single row with `-` placeholders for `no` and `unknown` queries:

    query chimera parent nast_start nast_end region_start region_end
    query_to_parent div_r query_to_parent_local

* `nast_*` are 0-based columns of the input alignment
* `region_*` are 0-based columns after trimming and all-gap column removal
* `unknown`: fewer than two templates cover more than --min-cov of the query

Search methods:
* `distance`: the --num-wanted templates closest by aligned distance
* `kmer`: k-mer search of the query's left and right thirds
* `blast`: word-seeded ungapped search of the left and right thirds

Examples:
1. Check queries against templates:
   chimr detect tests/chimera/queries.fa --ref tests/chimera/templates.fa

2. Pick candidates by distance, using 4 threads:
   chimr detect tests/chimera/queries.fa --ref tests/chimera/templates.fa --search distance -p 4

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Aligned query FASTA file to process"),
        )
        .arg(
            Arg::new("ref")
                .long("ref")
                .short('r')
                .required(true)
                .num_args(1)
                .help("Aligned template FASTA file"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_parser(["distance", "blast", "kmer"])
                .default_value("kmer")
                .help("How candidate parents are chosen"),
        )
        .arg(
            Arg::new("num_wanted")
                .long("num-wanted")
                .short('n')
                .value_parser(value_parser!(usize))
                .default_value("15")
                .help("Number of candidate parents to request"),
        )
        .arg(
            Arg::new("match")
                .long("match")
                .value_parser(value_parser!(i32))
                .default_value("5")
                .allow_negative_numbers(true)
                .help("Score for matching bases"),
        )
        .arg(
            Arg::new("mismatch")
                .long("mismatch")
                .value_parser(value_parser!(i32))
                .default_value("-4")
                .allow_negative_numbers(true)
                .help("Score for mismatching bases"),
        )
        .arg(
            Arg::new("divergence")
                .long("divergence")
                .value_parser(value_parser!(f32))
                .default_value("1.007")
                .help("Minimum divergence ratio of a breakpoint"),
        )
        .arg(
            Arg::new("min_sim")
                .long("min-sim")
                .value_parser(value_parser!(i32))
                .default_value("90")
                .help("Minimum similarity; accepted but not used"),
        )
        .arg(
            Arg::new("min_cov")
                .long("min-cov")
                .value_parser(value_parser!(i32))
                .default_value("70")
                .help("Templates must cover more than this percent of the query"),
        )
        .arg(
            Arg::new("trim")
                .long("trim")
                .value_parser(["union", "overlap"])
                .default_value("union")
                .help("Window shared by the query and its candidates"),
        )
        .arg(
            Arg::new("kmer")
                .long("kmer")
                .short('k')
                .value_parser(value_parser!(usize))
                .default_value("7")
                .help("K-mer size of --search kmer"),
        )
        .arg(
            Arg::new("word")
                .long("word")
                .value_parser(value_parser!(usize))
                .default_value("11")
                .help("Word size of --search blast"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .value_parser(value_parser!(usize))
                .num_args(1)
                .default_value("1")
                .help("Number of threads for parallel processing"),
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
    let params = ChimeraParams {
        num_wanted: *args.get_one::<usize>("num_wanted").unwrap(),
        match_score: *args.get_one::<i32>("match").unwrap(),
        mismatch_penalty: *args.get_one::<i32>("mismatch").unwrap(),
        min_div_r: *args.get_one::<f32>("divergence").unwrap(),
        min_similarity: *args.get_one::<i32>("min_sim").unwrap(),
        min_coverage: *args.get_one::<i32>("min_cov").unwrap(),
        search: args.get_one::<String>("search").unwrap().parse::<SearchMethod>()?,
        trim: args.get_one::<String>("trim").unwrap().parse::<TrimMode>()?,
        kmer_size: *args.get_one::<usize>("kmer").unwrap(),
        word_size: *args.get_one::<usize>("word").unwrap(),
    };
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();

    //----------------------------
    // Load
    //----------------------------
    let templates = read_aligned(chimr::reader(args.get_one::<String>("ref").unwrap())?)?;
    let queries = read_aligned(chimr::reader(args.get_one::<String>("infile").unwrap())?)?;
    log::info!(
        "{} queries against {} templates, {:?} search",
        queries.len(),
        templates.len(),
        params.search
    );

    let supplier = build_supplier(params.search, &templates, params.kmer_size, params.word_size)?;
    let maligner = Maligner::new(&templates, supplier.as_ref(), &params);

    //----------------------------
    // Operating
    //----------------------------
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build()?;
    let cancel = CancelToken::new();

    let detections: Vec<Detection> = pool.install(|| {
        queries
            .par_iter()
            .map(|query| {
                maligner.detect(query, &cancel).map_err(|e| {
                    // stop the others, the run fails anyway
                    cancel.cancel();
                    anyhow::anyhow!("{}: {}", query.name(), e)
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = chimr::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_all(
        "#query\tchimera\tparent\tnast_start\tnast_end\tregion_start\tregion_end\tquery_to_parent\tdiv_r\tquery_to_parent_local\n"
            .as_ref(),
    )?;

    for (query, detection) in queries.iter().zip(&detections) {
        writer.write_all(format_detection(query.name(), detection).as_ref())?;
    }

    let num_chimeras = detections.iter().filter(|d| d.is_chimera()).count();
    let num_unknown = detections
        .iter()
        .filter(|d| d.classification == Classification::Unknown)
        .count();
    log::info!(
        "{} chimeras, {} unknown among {} queries",
        num_chimeras,
        num_unknown,
        detections.len()
    );

    Ok(())
}

fn format_detection(name: &str, detection: &Detection) -> String {
    if !detection.is_chimera() {
        return format!(
            "{}\t{}{}\n",
            name,
            detection.classification,
            "\t-".repeat(8)
        );
    }

    let mut out_string = "".to_string();
    for region in &detection.regions {
        out_string += format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.4}\t{:.2}\n",
            name,
            detection.classification,
            region.parent,
            region.nast_start,
            region.nast_end,
            region.region_start,
            region.region_end,
            region.query_to_parent,
            region.div_r,
            region.query_to_parent_local,
        )
        .as_ref();
    }

    out_string
}

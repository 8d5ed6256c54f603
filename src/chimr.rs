extern crate clap;
use clap::*;

mod cmd_chimr;

fn main() -> anyhow::Result<()> {
    let app = Command::new("chimr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`chimr` - Chimera detection for aligned sequences")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log the stages of each query to stderr"),
        )
        .subcommand(cmd_chimr::detect::make_subcommand())
        .subcommand(cmd_chimr::pident::make_subcommand())
        .subcommand(cmd_chimr::vfilter::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Chimeras:
    * detect  - Find chimeric queries and their parents

* Alignments:
    * pident  - Pairwise percent identity
    * vfilter - Remove all-gap columns

"###,
        );

    let matches = app.get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("detect", sub_matches)) => cmd_chimr::detect::execute(sub_matches),
        Some(("pident", sub_matches)) => cmd_chimr::pident::execute(sub_matches),
        Some(("vfilter", sub_matches)) => cmd_chimr::vfilter::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

use clap::{
    crate_authors, crate_description, crate_name, crate_version, App, Arg, ArgGroup, ArgMatches,
};
use gcompact::{
    config::{HeaderMode, Options, ParseMode, TieBreak},
    error::Err,
    task::{deserialize_file, inspect_file, serialize_file},
};
use log::info;
use std::error::Error;

fn value_of<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Err> {
    matches
        .value_of(name)
        .ok_or_else(|| Err::InvalidArguments(format!("missing --{}", name)))
}

fn parse_options(matches: &ArgMatches) -> Result<Options, Err> {
    Ok(Options::new()
        .parse_mode(if matches.is_present("strict") {
            ParseMode::Strict
        } else {
            ParseMode::Permissive
        })
        .header_mode(if matches.is_present("legacy-header") {
            HeaderMode::Legacy
        } else {
            HeaderMode::Corrected
        })
        .tie_break(value_of(matches, "tie-break")?.parse::<TieBreak>()?)
        .tolerate_legacy_header(matches.is_present("tolerate-legacy-header")))
}

fn handle_serialize(matches: &ArgMatches) -> Result<(), Err> {
    let options = parse_options(matches)?;
    info!(
        "serializing with {} header, {} parsing, {} tie-break",
        options.get_header_mode(),
        options.get_parse_mode(),
        options.get_tie_break()
    );
    serialize_file(
        value_of(matches, "input")?,
        value_of(matches, "output")?,
        &options,
    )?;
    Ok(())
}

fn handle_deserialize(matches: &ArgMatches) -> Result<(), Err> {
    let options = parse_options(matches)?;
    deserialize_file(
        value_of(matches, "input")?,
        value_of(matches, "output")?,
        &options,
    )?;
    Ok(())
}

fn handle_info(matches: &ArgMatches) -> Result<(), Err> {
    let options = parse_options(matches)?;
    println!("{}", inspect_file(value_of(matches, "input")?, &options)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("serialize")
                .short("s")
                .long("serialize")
                .help("Encodes a tab-separated edge list"),
        )
        .arg(
            Arg::with_name("deserialize")
                .short("d")
                .long("deserialize")
                .help("Decodes a binary file into an edge list"),
        )
        .arg(
            Arg::with_name("info")
                .short("t")
                .long("info")
                .help("Prints format, header count, entries, edges and vertices"),
        )
        .group(
            ArgGroup::with_name("mode")
                .args(&["serialize", "deserialize", "info"])
                .required(true),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .value_name("PATH")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("PATH")
                .takes_value(true)
                .required_unless("info"),
        )
        .arg(
            Arg::with_name("legacy-header")
                .long("legacy-header")
                .help("Counts the pre-filter vertex snapshot in the header, without magic"),
        )
        .arg(
            Arg::with_name("tolerate-legacy-header")
                .long("tolerate-legacy-header")
                .help("Reads a legacy file whose body ends on an entry boundary before its header count"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Rejects malformed numeric fields instead of reading them as 0"),
        )
        .arg(
            Arg::with_name("tie-break")
                .long("tie-break")
                .value_name("ORDER")
                .takes_value(true)
                .default_value("asc")
                .help("Order of equal-degree vertices by id: asc or desc"),
        )
        .get_matches();
    if matches.is_present("serialize") {
        handle_serialize(&matches)?;
    } else if matches.is_present("deserialize") {
        handle_deserialize(&matches)?;
    } else if matches.is_present("info") {
        handle_info(&matches)?;
    }
    Ok(())
}

#![deny(clippy::all)]

//! Command line driver: find a path across a text map with one of the
//! registered search algorithms.

use clap::{value_t, App, Arg, ArgMatches};

use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, Read};

use geometry::coord2d::map::Map;
use geometry::coord2d::Point;
use geometry::grid::Grid;
use searcher::{registry, AlgorithmKind, SearchOptions};

type Error = anyhow::Error;
type BoxedRead = Box<dyn Read + 'static>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No start given: mark one with S or pass --from")]
    MissingStart,

    #[error("No goal given: mark one with G or pass --to")]
    MissingGoal,

    #[error("Unknown algorithm {0}, expected one of: {1}")]
    UnknownAlgorithm(String, String),

    #[error("Map not found: {0}")]
    MapNotFound(String, #[source] io::Error),

    #[error("Invalid value for --{0}: {1}")]
    InvalidArgument(&'static str, String),
}

fn app() -> App<'static, 'static> {
    App::new("Heuristic search")
        .version("0.2.0")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Find paths across grid maps")
        .arg(
            Arg::with_name("algorithm")
                .value_name("ALGORITHM")
                .help("astar, best-first, idastar or rbfs")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("map")
                .value_name("MAP")
                .help("Map file, or - for standard input")
                .required(false)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("from")
                .long("from")
                .value_name("X,Y")
                .takes_value(true)
                .help("Start point, instead of the S mark"),
        )
        .arg(
            Arg::with_name("to")
                .long("to")
                .value_name("X,Y")
                .takes_value(true)
                .help("Goal point, instead of the G mark"),
        )
        .arg(
            Arg::with_name("diagonal")
                .long("diagonal")
                .help("Allow diagonal moves"),
        )
        .arg(
            Arg::with_name("max-iterations")
                .long("max-iterations")
                .value_name("N")
                .takes_value(true)
                .help("Deepening limit for idastar"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more, repeat for even more"),
        )
}

pub fn solver() -> Result<(), Error> {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    let reader = get_input_reader(matches.value_of("map"))?;
    let rendered = solve(&matches, reader)?;
    print!("{}", rendered);
    Ok(())
}

/// Install a `RUST_LOG` aware subscriber, defaulting to a level set by `-v`.
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn get_input_reader(filename: Option<&str>) -> Result<BoxedRead, Error> {
    let reader: BoxedRead = match filename {
        None | Some("-") => Box::new(io::stdin()),
        Some(path) => {
            let f = File::open(path).map_err(|e| CliError::MapNotFound(path.to_string(), e))?;
            Box::new(f)
        }
    };
    Ok(reader)
}

fn point_arg(matches: &ArgMatches, name: &'static str) -> Result<Option<Point>, Error> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| CliError::InvalidArgument(name, text.to_string()).into()),
    }
}

fn algorithm_arg(matches: &ArgMatches) -> Result<AlgorithmKind, Error> {
    let name = matches.value_of("algorithm").unwrap_or("astar");
    registry::lookup(name)
        .map_err(|_| CliError::UnknownAlgorithm(name.to_string(), registry::names().join(", ")).into())
}

fn options_arg(matches: &ArgMatches) -> Result<SearchOptions, Error> {
    let mut options = SearchOptions::default();
    if matches.is_present("max-iterations") {
        options.max_iterations = value_t!(matches, "max-iterations", usize).map_err(|_| {
            CliError::InvalidArgument(
                "max-iterations",
                matches.value_of("max-iterations").unwrap_or_default().to_string(),
            )
        })?;
    }
    Ok(options)
}

/// Run the search described by `matches` over the map in `reader`, and
/// render the result.
pub fn solve(matches: &ArgMatches, mut reader: BoxedRead) -> Result<String, Error> {
    let algorithm = algorithm_arg(matches)?;
    let options = options_arg(matches)?;

    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let grid: Grid = text.parse()?;

    let from = point_arg(matches, "from")?
        .or_else(|| grid.start())
        .ok_or(CliError::MissingStart)?;
    let to = point_arg(matches, "to")?
        .or_else(|| grid.goal())
        .ok_or(CliError::MissingGoal)?;
    debug!(%algorithm, %from, %to, "searching");

    let path = grid
        .pathfinder()
        .algorithm(algorithm)
        .diagonal(matches.is_present("diagonal"))
        .options(options)
        .find_path(from, to)?;

    Ok(match path {
        Some(path) => {
            info!(distance = path.distance(), "path found");
            format!(
                "{}Path length: {}\n",
                grid.render_path(&path),
                path.distance()
            )
        }
        None => format!("{}No path from {} to {}\n", grid, from, to),
    })
}

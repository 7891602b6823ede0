//! Command-line interface for fscript
//! Lexes or parses an fscript file and prints the result as JSON.
//!
//! Usage:
//!   fscript `<path>` [--format tokens|ast] [--indent-size `<n>`] [--indent-kind space|tab]
//!           [--config `<file>`] [-v...]
//!
//! Options are layered as: built-in defaults, then `--config`, then flags.
//! Logs go to stderr; `RUST_LOG` wins over `-v`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use fscript::fscript::config::{CompilerOptions, Loader};
use fscript::fscript::error::{format_source_context, Error, Result};
use fscript::fscript::pipeline::{lex_source, parse_source};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("fscript")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lex and parse fscript sources")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the fscript file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["tokens", "ast"])
                .default_value("ast"),
        )
        .arg(
            Arg::new("indent-size")
                .long("indent-size")
                .help("Width of one indentation unit")
                .value_parser(clap::value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("indent-kind")
                .long("indent-kind")
                .help("Indentation made of spaces or tabs")
                .value_parser(["space", "tab"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (-v: debug, -vv: trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("Error: missing <path>");
        std::process::exit(2);
    };

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&matches, &source) {
        eprintln!("Error: {}", e);
        if let Some(position) = e.position() {
            eprintln!();
            eprint!("{}", format_source_context(&source, position.line));
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(matches: &ArgMatches) -> Result<CompilerOptions> {
    let mut loader = Loader::new();
    if let Some(config) = matches.get_one::<String>("config") {
        loader = loader.with_file(config);
    }
    if let Some(size) = matches.get_one::<i64>("indent-size") {
        loader = loader.set_override("indent_size", *size)?;
    }
    if let Some(kind) = matches.get_one::<String>("indent-kind") {
        loader = loader.set_override("indent_kind", kind.as_str())?;
    }
    loader.build()
}

fn run(matches: &ArgMatches, source: &str) -> Result<()> {
    let options = load_options(matches)?;
    debug!(?options, "compiler options");

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("ast");

    let output = match format {
        "tokens" => serde_json::to_string_pretty(&lex_source(source, &options)?),
        _ => serde_json::to_string_pretty(&parse_source(source, &options)?),
    }
    .map_err(|e| Error::Io(e.into()))?;

    println!("{}", output);
    Ok(())
}

use std::io::{Read, Write};
use std::process::ExitCode;

use dfa_minimizer::prelude::*;
use thiserror::Error;

use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("dfamin")
    .about("Reads a deterministic finite automaton as JSON from stdin and minimizes it")
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("minimize")
        .about("writes the minimal automaton as JSON to stdout, this is the default")
        .arg(
            Arg::new("pretty")
            .long("pretty")
            .action(ArgAction::SetTrue)
            .help("indent the JSON output")
        )
    )
    .subcommand(
        Command::new("show")
        .about("prints the transition tables of the automaton and of its minimization")
        .arg(
            Arg::new("color")
            .long("color")
            .action(ArgAction::SetTrue)
            .help("highlight accepting states")
        )
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    // stdout carries the response, so everything is logged to stderr
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

/// Everything that can go wrong during one invocation.
#[derive(Debug, Error)]
enum CliError {
    #[error("could not read automaton from stdin: {0}")]
    Read(#[source] std::io::Error),
    #[error("could not write result to stdout: {0}")]
    Write(#[source] std::io::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Invalid(_) => ExitCode::from(1),
            CliError::Read(_) | CliError::Write(_) => ExitCode::from(2),
        }
    }
}

fn minimize(input: &str, pretty: bool) -> Result<String, ValidationError> {
    let description = Description::from_json(input)?;
    let minimal = minimize_description(&description)?;
    info!(
        "minimized automaton with {} states to {} states",
        description.num_states, minimal.num_states
    );
    Ok(if pretty {
        minimal.to_json_pretty()
    } else {
        minimal.to_json()
    })
}

fn show(input: &str, color: bool) -> Result<String, ValidationError> {
    let dfa = Description::from_json(input)?.validate()?;
    let minimal = dfa.minimize();
    Ok(format!(
        "input automaton with {} states:\n{}\nminimal automaton with {} states:\n{}",
        dfa.size(),
        dfa.build_transition_table(color),
        minimal.size(),
        minimal.build_transition_table(color)
    ))
}

fn run(matches: &ArgMatches, input: &str) -> Result<String, ValidationError> {
    match matches.subcommand() {
        Some(("show", sub_matches)) => {
            debug!("showing input automaton and its minimization");
            show(input, sub_matches.get_flag("color"))
        }
        Some(("minimize", sub_matches)) => minimize(input, sub_matches.get_flag("pretty")),
        None => minimize(input, false),
        _ => unreachable!(),
    }
}

fn execute(matches: &ArgMatches) -> Result<(), CliError> {
    debug!("reading automaton from stdin");
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut input)
        .map_err(CliError::Read)?;

    let output = run(matches, &input)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")
        .and_then(|_| stdout.flush())
        .map_err(CliError::Write)
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match execute(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

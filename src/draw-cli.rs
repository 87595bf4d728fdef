//! A simple CLI tool for running a secret santa draw offline.
//! This uses the same assignment engine as the server, but reads the
//! exchange from a JSON file and prints the pairing instead of messaging
//! anyone, which is useful for rehearsing a rule set before the real draw.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::process::exit;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rocket::serde::json::serde_json;
use serde::Deserialize;

use gift_draw::{Assignment, AssignmentEngine, ConstraintGraph, DrawError, Participant, Roster};
use santa_backend::model::exchange::ExclusionRule;

const PROGRAM_NAME: &str = "draw-cli";

const ABOUT_TEXT: &str = "Run a secret santa draw without sending anything.

EXIT CODES:
     0: A valid assignment was found and printed.
   255: No valid assignment exists (or none was found within the budget).
 Other: Error.";

const DRAW_PATH: &str = "DRAW_PATH";

const DRAW_PATH_HELP: &str = "The path to a JSON exchange description:\n\
{\"participants\": [\"Alice\", ...], \"rules\": [\"Alice cannot give to Bob\", ...]}";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME).about(ABOUT_TEXT).arg(
        Arg::new(DRAW_PATH)
            .help(DRAW_PATH_HELP)
            .action(ArgAction::Set)
            .required(true),
    )
}

/// On-disk description of an exchange.
#[derive(Debug, Deserialize)]
struct DrawFile {
    participants: Vec<String>,
    #[serde(default)]
    rules: Vec<String>,
}

/// Errors that this program may produce.
#[derive(Debug)]
enum Error {
    /// IO error described by the inner message.
    Io(String),
    /// Failed to decode or apply the JSON description.
    Format(String),
    /// The draw itself failed for the contained reason.
    Draw(DrawError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "IO error: {msg}"),
            Error::Format(msg) => write!(f, "Invalid draw description: {msg}"),
            Error::Draw(err) => err.fmt(f),
        }
    }
}

fn load(path: &str) -> Result<DrawFile, Error> {
    let file = File::open(path).map_err(|err| Error::Io(err.to_string()))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| Error::Format(err.to_string()))
}

fn run_draw(description: DrawFile) -> Result<Assignment, Error> {
    let mut roster = Roster::new();
    for name in description.participants {
        roster
            .insert(Participant {
                name,
                contact: String::new(),
            })
            .map_err(Error::Draw)?;
    }

    let mut exclusions = ConstraintGraph::new();
    for line in &description.rules {
        let rule: ExclusionRule = line
            .parse()
            .map_err(|err| Error::Format(format!("{line:?}: {err}")))?;
        exclusions.add_exclusion(&rule.donor, &rule.recipient);
    }

    AssignmentEngine::new()
        .assign(&roster, &exclusions)
        .map_err(Error::Draw)
}

fn main() {
    let matches: ArgMatches = cli().get_matches();
    let path = matches
        .get_one::<String>(DRAW_PATH)
        .expect("required argument");

    match load(path).and_then(run_draw) {
        Ok(assignment) => {
            for (donor, recipient) in assignment.pairs() {
                println!("{donor} -> {recipient}");
            }
            exit(0)
        }
        Err(Error::Draw(err @ DrawError::Infeasible { .. })) => {
            eprintln!("{err}");
            exit(255)
        }
        Err(err) => {
            eprintln!("{err}");
            exit(1)
        }
    }
}

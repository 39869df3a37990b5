use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;

use automaton::automaton::SimulationError;
use automaton::reader::{description_path, AutomatonReader};

#[derive(Parser, Debug)]
#[command(name = "automaton", about = "Tests a word against a DFA or an NFA read from a file")]
struct Cli {
    /// Description file, `.txt` is appended when missing. Asked for when omitted.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Word to test. Asked for when omitted.
    #[arg(short, long, value_name = "STRING")]
    input: Option<String>,

    /// Only print the result.
    #[arg(short, long)]
    quiet: bool,

    /// More logs (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\n', '\r'][..]).to_owned())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let name = match cli.file {
        Some(name) => name,
        None => prompt("Enter file name: ")?,
    };
    let path = description_path(&name);
    let automaton = AutomatonReader::new_from_file(&path)
        .with_context(|| format!("cannot read the automaton from `{}`", path))?;

    if !cli.quiet {
        println!("--- Automaton ---");
        print!("{}", automaton);
        println!("--- Delta ---");
        print!("{}", automaton.delta());
        let skipped = automaton.delta().skipped().len();
        if skipped > 0 {
            println!("({} malformed transition line(s) skipped)", skipped);
        }
        println!("--- Simulation ---");
    }

    if automaton.definition().start().is_none() {
        return Err(SimulationError::MissingStartState(automaton.kind()).into());
    }

    let input = match cli.input {
        Some(input) => input,
        None => prompt("Enter input string: ")?,
    };
    let accepted = match automaton.run(&input) {
        Ok(accepted) => accepted,
        Err(e @ SimulationError::MissingAcceptedStates(_)) => {
            eprintln!("Error: {}", e);
            false
        }
        Err(e) => return Err(e.into()),
    };
    println!("{}", if accepted { "True" } else { "False" });
    Ok(())
}

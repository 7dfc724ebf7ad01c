use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::Parser;
use lmath::{evaluate_document, literate::block::Block};

/// lmath evaluates literate math bodies such as `$@={.2f; km} d = 5 m * 300`
/// in order, sharing variables from one body to the next.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read the bodies from a file, one per line. Blank lines are skipped.
    #[arg(short, long, conflicts_with = "bodies")]
    file: Option<PathBuf>,

    /// Print every block as a JSON object.
    #[arg(long)]
    json: bool,

    /// Print an empty line for silent blocks instead of nothing.
    #[arg(long)]
    show_silent: bool,

    /// Exit with status 1 if any block failed.
    #[arg(long)]
    strict: bool,

    /// The bodies to evaluate. Read from stdin when neither bodies nor a file
    /// are given.
    bodies: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let bodies = if let Some(path) = &args.file {
        let contents = fs::read_to_string(path).unwrap_or_else(|_| {
                           eprintln!("Failed to read the input file '{}'. Perhaps this file does \
                                      not exist?",
                                     path.display());
                           std::process::exit(1);
                       });
        split_lines(&contents)
    } else if args.bodies.is_empty() {
        let mut contents = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut contents) {
            eprintln!("Failed to read from stdin: {e}");
            std::process::exit(1);
        }
        split_lines(&contents)
    } else {
        args.bodies.clone()
    };

    let chain = evaluate_document(&bodies);
    for block in chain.blocks() {
        if args.json {
            match serde_json::to_string(block) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Failed to serialize block '{}': {e}", block.body());
                    std::process::exit(1);
                },
            }
        } else {
            print_block(block, args.show_silent);
        }
    }

    if args.strict && chain.has_errors() {
        std::process::exit(1);
    }
}

fn print_block(block: &Block, show_silent: bool) {
    if let Some(message) = block.error_message() {
        println!("error: {message}");
    } else if let Some(display) = block.display_result() {
        println!("{display}");
    } else if show_silent {
        println!();
    }
}

fn split_lines(contents: &str) -> Vec<String> {
    contents.lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
}

use std::{fs, process};

use clap::Parser;
use pseudokod::{interpreter::value::core::Value, parse_and_run};

/// pseudokod runs the Polish/English teaching pseudocode used in algorithm
/// courses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pseudokod to read the program from a file instead of taking it
    /// as an argument.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the last statement after the program
    /// finishes, unless it is null.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents
    };

    match parse_and_run(&script) {
        Ok(Value::Null) => {},
        Ok(value) => {
            if args.pipe_mode {
                println!("{value}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}

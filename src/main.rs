use std::{fs, io, process};

use clap::Parser;
use declang::{
    check,
    config::{Config, DEFAULT_ENTRY_POINT, DEFAULT_MAX_CALL_DEPTH},
    error::Error,
    interpreter::{evaluator::core::Interpreter, printer::to_source},
    parse,
};

/// declang runs programs written in a small imperative language with
/// integer variables, functions and conditionals.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells declang to read a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Print the parsed program back as source text instead of running it.
    #[arg(long)]
    emit_source: bool,

    /// Print the checked scope tree to stderr before running.
    #[arg(long)]
    dump_scopes: bool,

    /// Function that runs as soon as its declaration is reached.
    #[arg(long = "entry", value_name = "NAME", default_value = DEFAULT_ENTRY_POINT)]
    entry_point: String,

    /// Maximum number of nested function calls.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    contents: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if let Err(e) = execute(&script, &args) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn execute(script: &str, args: &Args) -> Result<(), Error> {
    let program = parse(script)?;

    if args.emit_source {
        print!("{}", to_source(&program));
        return Ok(());
    }

    let scopes = check(&program)?;
    if args.dump_scopes {
        eprint!("{scopes}");
    }

    let config = Config { entry_point:    args.entry_point.clone(),
                          max_call_depth: args.max_call_depth, };
    let mut interpreter = Interpreter::new(&config, io::stdout().lock());
    interpreter.run(&program)?;
    Ok(())
}

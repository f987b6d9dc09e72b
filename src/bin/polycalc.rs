use clap::Parser;
use mimalloc::MiMalloc;
use polycalc::{
    script::Session,
    store::{ResultPolicy, StoreConfig},
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    process::ExitCode,
};
use tracing::{error, info, Level};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Runs a polynomial command script, one token per line, until the first
/// empty line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read the script from this file instead of the standard input
    #[arg(short, long)]
    input: Option<String>,

    /// Add each arithmetic result to the previous content of the result
    /// polynomial, instead of replacing it
    #[arg(short, long)]
    accumulate_result: bool,

    /// Log more details to stderr; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode, String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(match args.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .init();

    let config = StoreConfig {
        result_policy: if args.accumulate_result {
            ResultPolicy::Accumulate
        } else {
            ResultPolicy::Replace
        },
    };
    info!(?config, "starting session");

    let reader: Box<dyn BufRead> = match &args.input {
        Some(filename) => Box::new(BufReader::new(File::open(filename).map_err(|why| {
            format!("Could not open file \"{}\": {}", filename, why)
        })?)),
        None => Box::new(io::stdin().lock()),
    };
    // The whole script is read before anything runs.
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|why| format!("Could not read script: {}", why))?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::<i64>::new(config);
    let status = match session.run(lines, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "script failed");
            writeln!(out, "Error").map_err(|why| format!("Could not write output: {}", why))?;
            ExitCode::FAILURE
        }
    };
    out.flush()
        .map_err(|why| format!("Could not write output: {}", why))?;

    Ok(status)
}

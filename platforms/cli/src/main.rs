use anyhow::{Context, Result};
use beaver::{
    missing_pairs, unreachable_states, FinalOnly, JsonLines, Machine, Observer, Printer,
    ProgramManager, BUSY_BEAVER_3,
};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Runs a built-in Turing machine program and prints the tape after every step.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  beaver
  beaver --program \"Busy Beaver 4-state\" --quiet
  beaver --program \"Binary Increment\" --input 1111 --debug
  beaver --format json --output trace.jsonl")]
struct Cli {
    /// Name of the built-in program to run
    #[clap(short, long, default_value = BUSY_BEAVER_3)]
    program: String,

    /// Replace the program's initial tape contents
    #[clap(short, long)]
    input: Option<String>,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,

    /// Print the program configuration as JSON and exit
    #[clap(long)]
    dump: bool,

    /// Stop with an error if the machine has not halted after this many steps
    #[clap(long)]
    max_steps: Option<u64>,

    /// Trace output format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the trace to a file instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print step number, state and head position with each tape
    #[clap(short = 'd', long)]
    debug: bool,

    /// Only write the final snapshot, in the chosen format
    #[clap(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list {
        return list_programs();
    }

    let mut program = ProgramManager::get_program_by_name(&cli.program)
        .with_context(|| format!("unknown program '{}', see --list", cli.program))?;

    if let Some(input) = &cli.input {
        program.input = input.chars().collect();
    }

    if cli.dump {
        let json =
            serde_json::to_string_pretty(&program).context("failed to serialize program")?;
        println!("{json}");
        return Ok(());
    }

    for state in unreachable_states(&program) {
        warn!(%state, "state is unreachable from the initial state");
    }
    for (state, symbol) in missing_pairs(&program) {
        warn!(%state, %symbol, "no transition defined");
    }

    let mut machine = Machine::new(program).context("invalid machine configuration")?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create trace file {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut observer: Box<dyn Observer> = match cli.format {
        Format::Text => trace_with(Printer::new(out).with_details(cli.debug), cli.quiet),
        Format::Json => trace_with(JsonLines::new(out), cli.quiet),
    };

    let result = match cli.max_steps {
        Some(limit) => machine.run_bounded(limit, observer.as_mut()),
        None => machine.run_with(observer.as_mut()),
    };
    drop(observer);

    result.with_context(|| {
        format!(
            "machine stopped in state {} after {} steps",
            machine.state(),
            machine.step_count()
        )
    })?;

    info!(
        state = %machine.state(),
        steps = machine.step_count(),
        score = machine.score(),
        "halted"
    );

    Ok(())
}

/// Wraps `observer` so that only the halting snapshot reaches it when `quiet` is set.
fn trace_with<'a, O: Observer + 'a>(observer: O, quiet: bool) -> Box<dyn Observer + 'a> {
    if quiet {
        Box::new(FinalOnly::new(observer))
    } else {
        Box::new(observer)
    }
}

fn list_programs() -> Result<()> {
    let mut stdout = io::stdout().lock();

    for index in 0..ProgramManager::get_program_count() {
        let info = ProgramManager::get_program_info(index)?;
        writeln!(
            stdout,
            "{:<22} states={:<2} transitions={:<2} {}",
            info.name, info.state_count, info.transition_count, info.encoding
        )?;
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

use std::{
    fs::read_to_string,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use ape::{
    format_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    repl::{self, ReplMode},
};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter, Log, Metadata, Record};

#[derive(Parser)]
#[command(name = "ape")]
#[command(about = "Lexer and parser for the Ape scripting language")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell
    Repl {
        /// Parse each line instead of echoing its tokens
        #[arg(long)]
        parse: bool,
    },
    /// Print every token of a source file
    Tokens { file: PathBuf },
    /// Parse a source file and print the rendered program
    Parse { file: PathBuf },
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Repl { parse: false }) {
        Commands::Repl { parse } => run_repl(parse),
        Commands::Tokens { file } => run_tokens(file),
        Commands::Parse { file } => run_parse(file),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run_repl(parse: bool) -> io::Result<ExitCode> {
    println!("This is the Ape programming language!");
    println!("Feel free to type in commands\n");

    let mode = if parse { ReplMode::Ast } else { ReplMode::Tokens };
    repl::start(io::stdin().lock(), io::stdout(), mode)?;

    Ok(ExitCode::SUCCESS)
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}

fn run_tokens(file: PathBuf) -> io::Result<ExitCode> {
    let source = read_to_string(&file)?;
    let start = Instant::now();

    let tokens = tokenize(source, Some(file_name(&file)));
    info!("Tokenized in {:?}", start.elapsed());

    let mut out = io::stdout().lock();
    for token in tokens {
        writeln!(out, "{}", token)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn run_parse(file: PathBuf) -> io::Result<ExitCode> {
    let source = read_to_string(&file)?;
    let name = file_name(&file);
    let start = Instant::now();

    let (program, errors) = parse(&source, Some(name.clone()));
    info!("Parsed in {:?}", start.elapsed());

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}\n", format_error(error, &source, &name));
        }
        eprintln!("{} syntax error(s)", errors.len());
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", program);
    Ok(ExitCode::SUCCESS)
}

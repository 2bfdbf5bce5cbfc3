//! `autodoc`: inspect the documentation comments of source files.
use anyhow::{Context, Result};
use autodoc_config::Config;
use autodoc_core::{ParsedDoc, SourceKind, dump, parse_document};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

mod browse;
mod style;

#[derive(Parser)]
#[command(name = "autodoc", version)]
#[command(about = "Parse, check and browse AutoDoc documentation comments")]
struct Args {
    /// Comment convention of the input, overriding the config file
    #[arg(long, global = true, value_enum)]
    kind: Option<KindArg>,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// `//!` on every line
    Line,
    /// `/*! ... */`
    Block,
}

impl From<KindArg> for SourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Line => SourceKind::LineComment,
            KindArg::Block => SourceKind::BlockComment,
        }
    }
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Print the document tree and its diagnostics
    Tree { file: PathBuf },
    /// Print the tagged tree as JSON
    Json { file: PathBuf },
    /// Print the documentation with syntax colors
    Highlight { file: PathBuf },
    /// Report diagnostics, exiting with status 1 if there are any
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Browse the documentation of a source tree
    Browse { dir: Option<PathBuf> },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config()?;
    let kind = args.kind.map(SourceKind::from).unwrap_or(config.source_kind);
    log::info!("reading {kind} comments");

    match args.command {
        Command::Tree { file } => {
            let doc = parse_file(&file, kind)?;
            print!("{}", dump(&doc.nodes));
            for diagnostic in &doc.diagnostics {
                println!("{}:{diagnostic}", file.display());
            }
        }
        Command::Json { file } => {
            let doc = parse_file(&file, kind)?;
            let json = serde_json::to_string_pretty(&doc.tagged())
                .context("Failed to serialize tagged tree")?;
            println!("{json}");
        }
        Command::Highlight { file } => {
            let doc = parse_file(&file, kind)?;
            style::print_spans(&mut io::stdout().lock(), &doc.highlight())?;
        }
        Command::Check { files } => {
            let count = check_files(&files, kind, &mut io::stdout().lock())?;
            if count > 0 {
                process::exit(1);
            }
        }
        Command::Browse { dir } => {
            let dir = match dir.or_else(|| config.root.clone()) {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to read current directory")?,
            };
            browse::run(dir, &config, kind)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config() -> Result<Config> {
    let config = Config::load().context("Failed to load config file")?;
    if config.is_none() {
        log::debug!(
            "no config file at {}, using defaults",
            Config::config_path().display()
        );
    }
    Ok(config.unwrap_or_default())
}

fn parse_file(path: &Path, kind: SourceKind) -> Result<ParsedDoc> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_document(&text, kind))
}

/// Writes `path:line: severity: message` for every diagnostic and returns how many.
fn check_files(files: &[PathBuf], kind: SourceKind, out: &mut impl Write) -> Result<usize> {
    let mut count = 0;
    for file in files {
        let doc = parse_file(file, kind)?;
        for diagnostic in &doc.diagnostics {
            writeln!(out, "{}:{diagnostic}", file.display())?;
        }
        log::info!("{}: {} diagnostics", file.display(), doc.diagnostics.len());
        count += doc.diagnostics.len();
    }
    Ok(count)
}

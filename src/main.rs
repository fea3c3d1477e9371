//! mtlx CLI - Command-line tool for MaterialX documents.
//!
//! This is the main entry point for the mtlx command-line application.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use mtlx::prelude::*;

/// mtlx - MaterialX document checker and formatter
#[derive(Parser)]
#[command(name = "mtlx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReadArgs {
    /// Skip malformed attribute values instead of failing
    #[arg(long, env = "MTLX_LENIENT")]
    lenient: bool,
}

impl ReadArgs {
    fn options(&self) -> ReadOptions {
        if self.lenient {
            ReadOptions::lenient()
        } else {
            ReadOptions::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse documents and report errors
    Check {
        /// Files or directories (searched for *.mtlx)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Re-serialize a document
    Fmt {
        /// Input document
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spaces per indentation level (0 for single-line output)
        #[arg(long, env = "MTLX_INDENT", default_value_t = 2)]
        indent: usize,

        /// Omit the XML declaration
        #[arg(long)]
        no_declaration: bool,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Print a document as JSON
    Dump {
        /// Input document
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Print element counts per tag
    Info {
        /// Input document
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { paths, read } => {
            cmd_check(&paths, &read.options())?;
        }
        Commands::Fmt {
            input,
            output,
            indent,
            no_declaration,
            read,
        } => {
            let write = WriteOptions {
                indent: (indent > 0).then_some(indent),
                declaration: !no_declaration,
            };
            cmd_fmt(&input, output.as_deref(), &read.options(), &write)?;
        }
        Commands::Dump { input, read } => {
            cmd_dump(&input, &read.options())?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read and parse one document, logging skipped values.
fn load(path: &Path, options: &ReadOptions) -> Result<ParseOutcome> {
    let xml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let outcome = Document::parse_str_with(&xml, SchemaRegistry::global(), options)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    for skipped in &outcome.skipped {
        tracing::warn!(
            file = %path.display(),
            tag = %skipped.tag,
            attribute = %skipped.attribute,
            "{}",
            skipped.error
        );
    }

    Ok(outcome)
}

fn collect_documents(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path())
                    .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("mtlx"))),
            );
        } else {
            files.push(path.clone());
        }
    }

    files.sort();
    files
}

fn cmd_check(paths: &[PathBuf], options: &ReadOptions) -> Result<()> {
    let files = collect_documents(paths);
    if files.is_empty() {
        anyhow::bail!("No .mtlx files found");
    }

    let start = Instant::now();
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let results: Vec<(&PathBuf, Result<ParseOutcome>)> = files
        .par_iter()
        .map(|path| {
            let result = load(path, options);
            pb.inc(1);
            (path, result)
        })
        .collect();

    pb.finish_and_clear();

    let mut failed = 0;
    let mut skipped = 0;
    for (path, result) in &results {
        match result {
            Ok(outcome) => skipped += outcome.skipped.len(),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {:#}", path.display(), e);
            }
        }
    }

    println!(
        "Checked {} documents in {:?}: {} failed, {} values skipped",
        results.len(),
        start.elapsed(),
        failed,
        skipped
    );

    if failed > 0 {
        anyhow::bail!("{} of {} documents failed to parse", failed, results.len());
    }

    Ok(())
}

fn cmd_fmt(
    input: &Path,
    output: Option<&Path>,
    read: &ReadOptions,
    write: &WriteOptions,
) -> Result<()> {
    let outcome = load(input, read)?;
    let xml = outcome
        .document
        .to_xml_string(write)
        .context("Failed to serialize document")?;

    match output {
        Some(path) => {
            fs::write(path, xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(input = %input.display(), output = %path.display(), "formatted");
        }
        None => println!("{}", xml),
    }

    Ok(())
}

fn cmd_dump(input: &Path, read: &ReadOptions) -> Result<()> {
    let outcome = load(input, read)?;
    let json = serde_json::to_string_pretty(&outcome.document).context("Failed to encode JSON")?;
    println!("{}", json);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let outcome = load(input, &ReadOptions::lenient())?;
    let document = &outcome.document;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for element in document.root().descendants().skip(1) {
        *counts.entry(element.tag()).or_default() += 1;
    }

    println!("{}", input.display());
    println!("  version: {}", document.version().unwrap_or("?"));
    for (tag, count) in &counts {
        println!("  {:<16} {:>6}", tag, count);
    }
    if !outcome.skipped.is_empty() {
        println!("  malformed values: {}", outcome.skipped.len());
    }

    Ok(())
}

//! Sheetscan CLI - keyword search across spreadsheet macros and formulas.
//!
//! Scans a directory tree of `.xls`/`.xlsm` workbooks for a keyword in
//! embedded VBA macros and cell formulas. Matching workbooks (and matching
//! macro modules) are copied into `<output>/<keyword>/`, and every formula
//! match is appended to `formules_trouvees.txt` in that folder.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sheetscan_backend::{discover, pipeline, LibreOfficeConverter};
use sheetscan_core::{Keyword, MacroArchive, ResultSink};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sheetscan",
    version,
    about = "Keyword search across Excel macros and formulas (.xls/.xlsm)"
)]
struct Cli {
    /// Keyword to search for (e.g. `sum` or `=sum`)
    #[arg(short, long)]
    keyword: String,

    /// Directory containing Excel files to scan
    #[arg(short, long, default_value = "./assets/excel")]
    source: PathBuf,

    /// Directory that receives the keyword-named result folder
    #[arg(short, long, default_value = "./assets/macro_trouves")]
    output: PathBuf,

    /// Macro archive directory; accumulates across runs, never cleared
    #[arg(long, default_value = "./assets/macro")]
    macro_dir: PathBuf,

    /// External converter program used for legacy workbooks
    #[arg(long, default_value = "libreoffice")]
    converter: String,

    /// Worker threads (default: available cores, floor of 4)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Suppress the progress bar and info banners
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let keyword = Keyword::new(&cli.keyword);

    // The one fatal setup step: without the result folder there is nowhere
    // for any outcome to land.
    let sink = ResultSink::prepare(&cli.output, keyword.as_str()).with_context(|| {
        format!(
            "failed to prepare result folder under {}",
            cli.output.display()
        )
    })?;
    let archive = MacroArchive::open(&cli.macro_dir).with_context(|| {
        format!("failed to open macro archive at {}", cli.macro_dir.display())
    })?;

    if !cli.quiet {
        println!(
            "{} scanning {} for \"{}\"",
            "Info:".blue().bold(),
            cli.source.display(),
            keyword
        );
    }

    let converter = LibreOfficeConverter::new(cli.converter);
    let items = discover(&cli.source, &converter).with_context(|| {
        format!("failed to read source directory {}", cli.source.display())
    })?;

    if !cli.quiet {
        println!(
            "{} {} workbook(s) queued",
            "Info:".blue().bold(),
            items.len()
        );
    }

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(items.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("template is compile-time constant")
                .progress_chars("█▓▒░  "),
        );
        pb
    };

    let workers = cli.jobs.unwrap_or_else(pipeline::default_workers);
    let summary = pipeline::run_scan(&items, &keyword, &archive, &sink, workers, |_, _| {
        progress.inc(1);
    });
    progress.finish_and_clear();

    if !cli.quiet {
        println!(
            "{} {} scanned, {} matched, {} error(s)",
            "Done:".green().bold(),
            summary.scanned,
            summary.matched,
            summary.errors
        );
    }
    println!(
        "Analysis complete. Results saved in {}",
        sink.target_dir().display()
    );

    Ok(())
}

//! pagefit CLI - batch PDF page resizing tool

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagefit::{BatchEvent, BatchOptions, BatchProcessor, BatchReport, PageSizeTable};

#[derive(Parser)]
#[command(name = "pagefit")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Resize every page of a folder of PDFs to a named paper size", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Folder containing the PDF files
    #[arg(value_name = "FOLDER")]
    input: Option<PathBuf>,

    /// Target page size name (case-insensitive, default LETTER)
    #[arg(value_name = "PAGE_SIZE")]
    page_size: Option<String>,

    /// Name of the output subdirectory inside FOLDER
    #[arg(long, value_name = "NAME", default_value = pagefit::batch::DEFAULT_OUTPUT_DIR)]
    output_dir: String,

    /// Suffix appended to each output file name
    #[arg(long, value_name = "SUFFIX", default_value = pagefit::batch::DEFAULT_SUFFIX)]
    suffix: String,

    /// Skip files that fail instead of stopping the batch
    #[arg(long)]
    keep_going: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// List the known page sizes and exit
    #[arg(long)]
    list_sizes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    env_logger::init();

    let table = PageSizeTable::standard();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            print_usage(&table);
            return ExitCode::FAILURE;
        }
    };

    if let Some(Commands::Version) = cli.command {
        cmd_version();
        return ExitCode::SUCCESS;
    }

    if cli.list_sizes {
        print_size_table(&table);
        return ExitCode::SUCCESS;
    }

    let Some(input) = cli.input.as_deref() else {
        eprintln!("{}: missing input folder", "Error".red().bold());
        print_usage(&table);
        return ExitCode::FAILURE;
    };

    match cmd_resize(&cli, input, &table) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!(
                "{}: {} file(s) failed",
                "Error".red().bold(),
                report.failures.len()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            let is_user_error = e
                .downcast_ref::<pagefit::Error>()
                .is_some_and(|e| e.is_user_error());
            if is_user_error {
                print_usage(&table);
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_resize(
    cli: &Cli,
    input: &Path,
    table: &PageSizeTable,
) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let page_size = match cli.page_size.as_deref() {
        Some(name) => table.lookup_or_err(name)?,
        None => table.lookup_or_err(pagefit::model::DEFAULT_PAGE_SIZE)?,
    };

    let mut options = BatchOptions::new()
        .with_page_size(page_size)
        .with_output_dir_name(&cli.output_dir)
        .with_suffix(&cli.suffix);
    if cli.keep_going {
        options = options.lenient();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    let processor = BatchProcessor::new(options);
    let result = processor.run_with(input, |event| match event {
        BatchEvent::FileStarted { input } => {
            let line = format!("Processing: {}", file_name(input));
            pb.suspend(|| status(cli.json, &line));
        }
        BatchEvent::PageStarted { number, page_count } => {
            log::debug!("Beginning page {}...", number);
            pb.set_message(format!("page {}/{}", number, page_count));
            pb.tick();
        }
        BatchEvent::FileFinished { output, pages, .. } => {
            let line = format!(
                "  {} {} ({} pages)",
                "Saved to".green(),
                output.display(),
                pages
            );
            pb.suspend(|| status(cli.json, &line));
        }
        BatchEvent::FileFailed { input, error } => {
            pb.suspend(|| eprintln!("  {} {}: {}", "Failed".red(), file_name(input), error));
        }
    });
    pb.finish_and_clear();
    let report = result?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!(
            "\n{} {} file(s), {} page(s) resized to {} ({} x {} pt)",
            "Done!".green().bold(),
            report.files.len(),
            report.total_pages(),
            report.page_size.name,
            report.page_size.width,
            report.page_size.height
        );
        println!("  {} {}", "└─".dimmed(), report.output_dir.display());
    }

    Ok(report)
}

/// Progress lines go to stdout, or to stderr when stdout carries JSON.
fn status(json: bool, line: &str) {
    if json {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_usage(table: &PageSizeTable) {
    eprintln!("{}", "Usage: pagefit <FOLDER> [<PAGE_SIZE>]".yellow());
    eprintln!("   Where: PAGE_SIZE is chosen from the list below. Default is US Letter (8.5in x 11in).");
    eprintln!();
    eprint!("{}", format_size_list(table));
    eprintln!("       pagefit --help for more information");
}

fn print_size_table(table: &PageSizeTable) {
    println!("{}", "Page Sizes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for size in table.iter() {
        println!(
            "{} {:>8.2} x {:<8.2} pt",
            format!("{:<12}", size.name).bold(),
            size.width,
            size.height
        );
    }
}

/// Page size names in rows of four tab-aligned columns.
fn format_size_list(table: &PageSizeTable) -> String {
    let mut out = String::new();
    for (i, name) in table.names().enumerate() {
        out.push_str(name);
        out.push('\t');
        if name.len() < 16 {
            out.push('\t');
        }
        if name.len() < 8 {
            out.push('\t');
        }
        if (i + 1) % 4 == 0 {
            out.push('\n');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn cmd_version() {
    println!("{} {}", "pagefit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF page resizing tool");
    println!();
    println!("License: MIT");
}

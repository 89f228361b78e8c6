use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use lstcodec::{LineEnding, WriteOptions};
use lstcodec_cli::{RunOptions, run};
use tracing::level_filters::LevelFilter;

/// Converts LST localization files to a spreadsheet and back.
///
/// Pass one or more `.lst` files to collect them into one workbook (a sheet
/// per file), or a single workbook to split it into `Strings-<Sheet>.lst` files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// LST files, or a single workbook (.xlsx, .xls, .ods, .csv)
    inputs: Vec<PathBuf>,

    /// Output workbook (LST input) or output directory (workbook input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Terminate LST lines with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Start LST files with a UTF-8 byte order mark
    #[arg(long)]
    bom: bool,

    /// Show line-break markers as real line breaks inside table cells
    #[arg(long)]
    expand_line_breaks: bool,

    /// Log each file and sheet as it is processed
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if args.inputs.is_empty() {
        println!("Pass your .lst files or a single workbook to convert them.\n");
        println!("{}", Args::command().render_usage());
        return;
    }

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let line_ending = if args.crlf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };
    let options = RunOptions {
        inputs: args.inputs,
        output: args.output,
        write_options: WriteOptions::new()
            .with_line_ending(line_ending)
            .with_bom(args.bom)
            .with_expanded_line_breaks(args.expand_line_breaks),
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use super::VERSION;
use clap::{App, Arg};
use std::path::PathBuf;
use thiserror::Error;

/// One curve to draw: the csv file and its legend label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveFile {
    pub path: PathBuf,
    pub label: String,
}

/// A validated command line: the curves in input order plus the output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotJob {
    pub curves: Vec<CurveFile>,
    pub output: PathBuf,
}

/// The command line did not split into (file, label) pairs plus an output.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Incorrect number of arguments")]
pub struct UsageError;

/// Splits the positional arguments into (file, label) pairs and the
/// trailing output path.
/// The argument count must be odd and at least 3.
pub fn split_pairs(args: &[String]) -> Result<PlotJob, UsageError> {
    if args.len() < 3 || args.len() % 2 == 0 {
        return Err(UsageError);
    }
    let output = PathBuf::from(&args[args.len() - 1]);
    let curves = args[..args.len() - 1]
        .chunks(2)
        .map(|pair| CurveFile {
            path: PathBuf::from(&pair[0]),
            label: pair[1].clone(),
        })
        .collect();
    Ok(PlotJob { curves, output })
}

/// Takes the CLI arguments that control the plotting of the BER curves.
/// On a malformed argument count the usage message is printed and the
/// process exits with status 1, before any file is opened.
pub fn parse_cli() -> PlotJob {
    let arg_files = Arg::with_name("args")
        .help("pairs of csv file and curve label, followed by the output image")
        .value_name("FILE LABEL ... OUTPUT")
        .multiple(true);
    let cli_args = App::new("ber_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to overlay BER curves from channel code simulations")
        .usage("ber_plot <file1> <label1> [<file2> <label2> ...] <output>")
        .arg(arg_files)
        .get_matches();
    let args: Vec<String> = match cli_args.values_of("args") {
        Some(values) => values.map(String::from).collect(),
        None => Vec::new(),
    };
    let job = match split_pairs(&args) {
        Ok(job) => job,
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    };
    println!("Files to process:");
    for curve in &job.curves {
        println!("{} with label {}", curve.path.display(), curve.label);
    }
    return job;
}

//! OpenAPI Filter CLI
//!
//! Command-line interface for extracting a subset of an OpenAPI document.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use openapi_filter::{
    filter_document, load_document_auto, load_selectors, path_keys, render_document,
    write_document, FilterError, FilterOptions, FilterReport, Format, MatchMode, Selector,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-filter")]
#[command(about = "Extract selected paths from an OpenAPI document with the schemas they need")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep only the selected paths and the schemas they reference
    Filter {
        /// Document source: file path or URL (http:// or https://)
        spec: String,

        /// Path to keep (repeatable)
        #[arg(long = "path", short = 'p', required_unless_present = "paths_file")]
        paths: Vec<String>,

        /// File with one path selector per line (# starts a comment)
        #[arg(long)]
        paths_file: Option<PathBuf>,

        /// Treat selectors as regular expressions instead of literal paths
        #[arg(long)]
        regex: bool,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format: json or yaml (default: same as input)
        #[arg(long)]
        format: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Summary format on stderr: text (default) or json
        #[arg(long, default_value = "text")]
        report: String,

        /// Fail if a selector matched no path
        #[arg(long)]
        strict: bool,

        /// Suppress the summary and warnings, only show errors
        #[arg(long, short)]
        quiet: bool,
    },

    /// List the paths of a document
    Paths {
        /// Document source: file path or URL (http:// or https://)
        spec: String,

        /// Only list paths matching this regular expression
        #[arg(long)]
        regex: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Filter { quiet: true, .. });
    init_tracing(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Filter {
            spec,
            paths,
            paths_file,
            regex,
            output,
            format,
            pretty,
            report,
            strict,
            quiet,
        } => run_filter(FilterArgs {
            spec,
            paths,
            paths_file,
            regex,
            output,
            format,
            pretty,
            report,
            strict,
            quiet,
        }),

        Commands::Paths { spec, regex } => run_paths(&spec, regex),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct FilterArgs {
    spec: String,
    paths: Vec<String>,
    paths_file: Option<PathBuf>,
    regex: bool,
    output: Option<PathBuf>,
    format: Option<String>,
    pretty: bool,
    report: String,
    strict: bool,
    quiet: bool,
}

fn run_filter(args: FilterArgs) -> Result<(), u8> {
    let FilterArgs {
        spec,
        mut paths,
        paths_file,
        regex,
        output,
        format,
        pretty,
        report,
        strict,
        quiet,
    } = args;

    let format = match format.as_deref() {
        Some(name) => match Format::parse(name) {
            Some(format) => Some(format),
            None => {
                eprintln!("Error: unknown format \"{}\": expected json or yaml", name);
                return Err(2);
            }
        },
        None => None,
    };
    if report != "text" && report != "json" {
        eprintln!(
            "Error: unknown report format \"{}\": expected text or json",
            report
        );
        return Err(2);
    }

    if let Some(file) = &paths_file {
        paths.extend(load_selectors(file).map_err(exit_with)?);
    }

    let options = FilterOptions::new(MatchMode::from_regex_flag(regex))
        .format(format)
        .pretty(pretty);

    let selector = Selector::new(paths, options.mode).map_err(exit_with)?;
    let loaded = load_document_auto(&spec).map_err(exit_with)?;

    let filtered = filter_document(&loaded.document, &selector);

    let rendered = render_document(
        &filtered.document,
        options.format.unwrap_or(loaded.format),
        options.pretty,
    )
    .map_err(exit_with)?;

    match output {
        Some(path) => write_document(&path, &rendered).map_err(exit_with)?,
        None => {
            // YAML output already ends with a newline
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    if !quiet {
        print_report(&filtered.report, &report);
    }

    if strict && !filtered.report.unmatched().is_empty() {
        eprintln!(
            "Error: {} selector(s) matched no path",
            filtered.report.unmatched().len()
        );
        return Err(1);
    }

    Ok(())
}

fn print_report(report: &FilterReport, format: &str) {
    if format == "json" {
        match serde_json::to_string(report) {
            Ok(json) => eprintln!("{}", json),
            Err(e) => eprintln!("Error serializing report: {}", e),
        }
    } else {
        eprintln!("{}", report);
    }
}

fn run_paths(spec: &str, regex: Option<String>) -> Result<(), u8> {
    let selector = regex
        .map(|pattern| Selector::pattern([pattern]))
        .transpose()
        .map_err(exit_with)?;
    let loaded = load_document_auto(spec).map_err(exit_with)?;

    for path in path_keys(&loaded.document) {
        if selector.as_ref().map_or(true, |s| s.matches(path)) {
            println!("{}", path);
        }
    }
    Ok(())
}

/// Print an error and return its exit code.
fn exit_with(err: FilterError) -> u8 {
    eprintln!("Error: {}", err);
    err.exit_code() as u8
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use skelgen::validator::{NoopValidator, PhpBinaryValidator, SyntaxValidator};
use skelgen::walker::{process_directory, ErrorPolicy, Outcome, RunReport};
use skelgen::FileStorage;

#[derive(Parser)]
#[command(
    name = "skelgen",
    version,
    about = "Generates skeleton test classes from plain-text test definitions"
)]
struct Cli {
    /// Root of the test tree; definitions are read from `<root>/definitions`
    root: PathBuf,

    /// Continue after a failing definition file instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// Skip the external syntax check on generated source
    #[arg(long)]
    skip_check: bool,

    /// Interpreter binary used for the syntax check
    #[arg(long, default_value = "php")]
    php_bin: String,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

/// Output format for the run summary.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON object with per-file outcomes and failures
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("Running {}", cli.root.display());

    let definitions = cli.root.join("definitions");
    let storage = FileStorage::new(&cli.root);
    let validator: Box<dyn SyntaxValidator> = if cli.skip_check {
        Box::new(NoopValidator)
    } else {
        Box::new(PhpBinaryValidator::new(cli.php_bin))
    };
    let policy = if cli.keep_going {
        ErrorPolicy::KeepGoing
    } else {
        ErrorPolicy::FailFast
    };

    let report = match process_directory(&definitions, &storage, validator.as_ref(), policy) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.format {
        Format::Text => print_summary(&report),
        Format::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
    }

    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_summary(report: &RunReport) {
    for file in &report.outcomes {
        match &file.outcome {
            Outcome::Created => println!("created   {}", file.class_name),
            Outcome::Appended { methods } => {
                println!("appended  {} (+{methods})", file.class_name);
            }
            Outcome::Unchanged => println!("unchanged {}", file.class_name),
        }
    }
    if !report.failures.is_empty() {
        eprintln!("{} definition file(s) failed", report.failures.len());
    }
}

use anyhow::Context as _;
use clap::Parser as _;
use obsolete_packages::cleanup::{CleanupReport, remove_paths};
use obsolete_packages::discover::{DEFAULT_MAKE, default_package_dir};
use obsolete_packages::index::ObsoleteGroup;
use obsolete_packages::scan::{build_index, regular_files};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(version, about)]
struct Options {
    /// Package directories to scan (defaults to the ports tree's PKGREPOSITORY)
    paths: Vec<PathBuf>,

    /// Delete obsolete packages instead of listing them
    #[arg(long)]
    delete: bool,

    /// Use verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only print errors
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,

    /// make program used to locate the package repository
    #[arg(long, default_value = DEFAULT_MAKE)]
    make: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    groups: &'a [ObsoleteGroup],
    #[serde(skip_serializing_if = "Option::is_none")]
    cleanup: Option<&'a CleanupReport>,
}

fn main() -> ExitCode {
    let options = Options::parse();
    init_logging(&options);

    match real_main(options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(options: &Options) {
    let level = if options.quiet {
        "error"
    } else {
        match options.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when some obsolete file could not be removed.
fn real_main(options: Options) -> anyhow::Result<bool> {
    let roots = if options.paths.is_empty() {
        vec![
            default_package_dir(&options.make)
                .context("no directory given and the package repository could not be located")?,
        ]
    } else {
        options.paths
    };

    let files = regular_files(&roots);
    let groups = build_index(&files).obsolete();
    let obsolete = groups
        .iter()
        .flat_map(|g| g.obsolete.iter().map(PathBuf::as_path));

    let cleanup = options.delete.then(|| remove_paths(obsolete.clone()));

    match options.format {
        Format::Text => match &cleanup {
            Some(report) => {
                if options.verbose > 0 {
                    for path in &report.removed {
                        println!("{}", path.display());
                    }
                }
                for failure in &report.failed {
                    eprintln!("{}: {}", failure.path.display(), failure.error);
                }
            }
            None => {
                for path in obsolete {
                    println!("{}", path.display());
                }
            }
        },
        Format::Json => {
            let report = JsonReport {
                groups: &groups,
                cleanup: cleanup.as_ref(),
            };
            let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(cleanup.is_none_or(|report| report.is_success()))
}

use std::{io::IsTerminal, path::PathBuf};

use clap::{Parser, Subcommand};
use l10n_bridge::Direction;
use l10n_bridge_cli::{
    CoverageReport, coverage::DEFAULT_REPORT_PATH, run_convert_command, settings_for,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding `jsons/`, `values/` and `Localizable.xcstrings`
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Language whose table decides the catalog's keys (default: en-US)
    #[arg(long, global = true)]
    source_language: Option<String>,

    /// Keep newlines raw in strings.xml instead of writing `\n`
    #[arg(long, global = true)]
    legacy_escapes: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert `values/{lang}/string.xml` files to `jsons/{lang}.json`.
    XmlToJson,
    /// Convert `jsons/{lang}.json` files to `values/{lang}/string.xml`.
    JsonToXml,
    /// Build `Localizable.xcstrings` from `jsons/{lang}.json`.
    JsonToCatalog,
    /// Regenerate `jsons/{lang}.json` from `Localizable.xcstrings`.
    CatalogToJson,
    /// Print a file-wise summary of a Kover/JaCoCo XML coverage report.
    Coverage {
        /// The report to summarize
        #[arg(long, default_value = DEFAULT_REPORT_PATH)]
        report: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let direction = match args.commands {
        Commands::XmlToJson => Direction::XmlToJson,
        Commands::JsonToXml => Direction::JsonToXml,
        Commands::JsonToCatalog => Direction::JsonToCatalog,
        Commands::CatalogToJson => Direction::CatalogToJson,
        Commands::Coverage { report } => {
            let report = CoverageReport::read_from(&report)?;
            print!("{}", report.summary());
            return Ok(());
        }
    };
    let settings = settings_for(
        &args.root,
        args.source_language.as_deref(),
        args.legacy_escapes,
    )?;
    tracing::debug!(
        root = %args.root.display(),
        source_language = %settings.source_language,
        escape = %settings.escape_mode,
        "resolved settings"
    );
    run_convert_command(direction, &settings)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

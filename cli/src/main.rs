//! kgx CLI: identifier, case and record-merging utilities from the command line

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use kgx::case::{
    camelcase_to_sentencecase, sentencecase_to_camelcase, sentencecase_to_snakecase,
    snakecase_to_sentencecase,
};
use kgx::config::KgxConfig;
use kgx::curie::PrefixManager;
use kgx::graph::PropertyMap;
use kgx::logging::init_logging;
use kgx::merge::{MultivaluedTable, PropertyMerger};
use kgx::services::KgxContext;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "kgx", version, about = "Knowledge graph exchange utilities")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "KGX_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Contract IRIs to CURIEs
    Contract {
        iris: Vec<String>,

        /// Extra JSON-LD context, consulted before the built-in ones
        #[arg(long = "context")]
        contexts: Vec<PathBuf>,

        /// Do not fall back to the built-in contexts
        #[arg(long)]
        no_fallback: bool,
    },
    /// Expand CURIEs to IRIs
    Expand {
        curies: Vec<String>,

        /// Extra JSON-LD context, consulted before the built-in ones
        #[arg(long = "context")]
        contexts: Vec<PathBuf>,

        /// Do not fall back to the built-in contexts
        #[arg(long)]
        no_fallback: bool,
    },
    /// Show case conversions of each value
    Case { values: Vec<String> },
    /// Merge JSON property records, left to right
    Merge {
        files: Vec<PathBuf>,

        /// Replace single-valued properties instead of accumulating them
        #[arg(long)]
        overwrite: bool,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
        run(&cli, config)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> CliResult<KgxConfig> {
    match path {
        Some(path) => Ok(KgxConfig::from_file(path)?),
        None => Ok(KgxConfig::default()),
    }
}

fn run(cli: &Cli, config: KgxConfig) -> CliResult<()> {
    match &cli.command {
        Commands::Contract {
            iris,
            contexts,
            no_fallback,
        } => {
            let manager = prefix_manager(&config, contexts, !no_fallback)?;
            let rows = iris.iter().map(|iri| vec![iri.clone(), manager.contract(iri)]);
            print_rows(&cli.format, &["iri", "curie"], rows.collect())
        }
        Commands::Expand {
            curies,
            contexts,
            no_fallback,
        } => {
            let manager = prefix_manager(&config, contexts, !no_fallback)?;
            let rows = curies.iter().map(|curie| vec![curie.clone(), manager.expand(curie)]);
            print_rows(&cli.format, &["curie", "iri"], rows.collect())
        }
        Commands::Case { values } => {
            let rows = values.iter().map(|value| {
                let sentence = if value.contains('_') {
                    snakecase_to_sentencecase(value)
                } else {
                    camelcase_to_sentencecase(value)
                };
                vec![
                    value.clone(),
                    sentencecase_to_snakecase(&sentence),
                    sentencecase_to_camelcase(&sentence),
                    sentence,
                ]
            });
            print_rows(
                &cli.format,
                &["input", "snake_case", "CamelCase", "sentence case"],
                rows.collect(),
            )
        }
        Commands::Merge { files, overwrite } => run_merge(&config, files, !overwrite),
    }
}

fn prefix_manager(config: &KgxConfig, extra: &[PathBuf], fallback: bool) -> CliResult<PrefixManager> {
    let contexts: Vec<&PathBuf> = config.prefix_contexts.iter().chain(extra).collect();
    debug!("Using {} custom contexts", contexts.len());
    Ok(PrefixManager::from_context_files(&contexts, fallback)?)
}

fn run_merge(config: &KgxConfig, files: &[PathBuf], preserve: bool) -> CliResult<()> {
    let table = match &config.schema {
        Some(_) => {
            let context = KgxContext::from_config(config);
            MultivaluedTable::from_toolkit(&*context.toolkit(None)?)
        }
        None => MultivaluedTable::builtin(),
    };
    let merger = PropertyMerger::new(&table);

    let mut merged = PropertyMap::new();
    for file in files {
        let document = std::fs::read_to_string(file)
            .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
        let record: PropertyMap = serde_json::from_str(&document)?;
        merged = merger.merge(&merged, &record, preserve);
    }

    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

fn print_rows(format: &OutputFormat, header: &[&str], rows: Vec<Vec<String>>) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let records: Vec<serde_json::Map<String, serde_json::Value>> = rows
                .into_iter()
                .map(|row| {
                    header
                        .iter()
                        .map(|h| h.to_string())
                        .zip(row.into_iter().map(serde_json::Value::String))
                        .collect()
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(header);
            for row in rows {
                table.add_row(row);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

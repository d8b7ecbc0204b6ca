//! cimgraph command line
//!
//! ```bash
//! cimgraph --model grid_EQ.xml units
//! cimgraph --model grid_EQ.xml windings --transformer _T1 --transformer _T2
//! cimgraph --model grid_EQ.xml --format json validate
//! cimgraph afrr --imbalance imbalance.json --activation afrr.json
//! ```

mod render;

use anyhow::{bail, Context, Result};
use cimgraph::query::ClassCount;
use cimgraph::timeseries::{afrr_assessment, join_series, read_payload};
use cimgraph::{CimError, Model, Settings, ValidatorOptions};
use clap::{Parser, Subcommand, ValueEnum};
use render::{cell, table};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "cimgraph", version)]
#[command(about = "Query and validate CIM RDF/XML power-grid models")]
struct Cli {
    /// CIM RDF/XML model file
    #[arg(long, short, global = true, env = "CIMGRAPH_MODEL")]
    model: Option<PathBuf>,

    /// TOML settings file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, default_value = "table", value_enum)]
    format: OutputFormat,

    /// Reject malformed XML instead of recovering
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Model(ModelCommand),
    /// Assess aFRR activation against system imbalance
    Afrr {
        /// Exported imbalance payload (JSON)
        #[arg(long)]
        imbalance: PathBuf,
        /// Exported aFRR activation payload (JSON)
        #[arg(long)]
        activation: PathBuf,
    },
}

/// Commands that read a model file
#[derive(Subcommand)]
enum ModelCommand {
    /// List generating units with their maximum operating power
    Units,
    /// Show regulation details of a generator
    Regulation {
        /// Exact IdentifiedObject.name of the SynchronousMachine
        #[arg(long)]
        name: String,
    },
    /// List the windings of one or more transformers
    Windings {
        /// Transformer rdf:ID (repeatable)
        #[arg(long, required = true)]
        transformer: Vec<String>,
    },
    /// List the operational limits of one or more lines
    Limits {
        /// ACLineSegment rdf:ID (repeatable)
        #[arg(long, required = true)]
        line: Vec<String>,
    },
    /// List tag names containing a substring
    Tags {
        #[arg(long)]
        contains: String,
    },
    /// Find the slack generator
    Slack,
    /// Run the structural validator; exits with 1 when issues are found
    Validate {
        /// Also report repeated rdf:ID values
        #[arg(long)]
        duplicates: bool,
    },
    /// Count elements per CIM class
    Summary,
}

/// Rows of one keyed query
#[derive(Serialize)]
struct Keyed<'a, T> {
    #[serde(rename = "Key")]
    key: &'a str,
    #[serde(rename = "Rows")]
    rows: &'a [T],
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    render: impl FnOnce() -> tabled::Table,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", render()),
    }
    Ok(())
}

fn load_model(path: Option<&Path>, settings: &Settings) -> Result<Model> {
    let Some(path) = path else {
        bail!("no model file given (use --model or CIMGRAPH_MODEL)");
    };
    Model::load(path, settings).with_context(|| format!("failed to load {}", path.display()))
}

fn run_afrr(imbalance: &Path, activation: &Path, format: OutputFormat) -> Result<()> {
    let imbalance = read_payload(imbalance).with_context(|| format!("reading {}", imbalance.display()))?;
    let activation = read_payload(activation).with_context(|| format!("reading {}", activation.display()))?;
    let joined = join_series(&imbalance, &activation);
    debug!(samples = joined.len(), "joined imbalance and activation");

    let rows = afrr_assessment(&joined).rows();
    emit(format, &rows, || {
        table(
            &["metric", "value"],
            rows.iter().map(|row| vec![row.metric.to_string(), row.value.to_string()]),
        )
    })
}

fn run_model_command(
    model: &Model,
    command: &ModelCommand,
    format: OutputFormat,
    settings: &Settings,
) -> Result<ExitCode> {
    match command {
        ModelCommand::Units => {
            let rows = model.generating_units()?;
            emit(format, &rows, || {
                table(
                    &["GeneratingUnit", "MaxOperatingP_MW"],
                    rows.iter()
                        .map(|row| vec![cell(row.name.as_deref()), cell(row.max_operating_p)]),
                )
            })?;
        }
        ModelCommand::Regulation { name } => {
            let Some(row) = model.generator_regulation(name)? else {
                return Err(CimError::not_found("generator", name.as_str()).into());
            };
            emit(format, &row, || {
                table(
                    &[
                        "Generator",
                        "VoltageRegulationRange",
                        "RegulatingControlRef",
                        "MachineType",
                    ],
                    [vec![
                        row.generator.clone(),
                        cell(row.voltage_regulation_range),
                        cell(row.regulating_control.as_deref()),
                        cell(row.machine_type.as_deref()),
                    ]],
                )
            })?;
        }
        ModelCommand::Windings { transformer } => {
            let ids: Vec<&str> = transformer.iter().map(String::as_str).collect();
            let results = model.windings_for_all(&ids)?;
            let keyed: Vec<_> = results
                .iter()
                .map(|(key, rows)| Keyed {
                    key: key.as_str(),
                    rows: rows.as_slice(),
                })
                .collect();
            emit(format, &keyed, || {
                table(
                    &["Transformer", "EndNumber", "NominalVoltage_kV"],
                    results.iter().flat_map(|(key, rows)| {
                        rows.iter().map(move |row| {
                            vec![key.clone(), cell(row.end_number), cell(row.nominal_voltage)]
                        })
                    }),
                )
            })?;
        }
        ModelCommand::Limits { line } => {
            let ids: Vec<&str> = line.iter().map(String::as_str).collect();
            let results = model.limits_for_all(&ids)?;
            let keyed: Vec<_> = results
                .iter()
                .map(|(key, rows)| Keyed {
                    key: key.as_str(),
                    rows: rows.as_slice(),
                })
                .collect();
            emit(format, &keyed, || {
                table(
                    &["Line", "LimitKind", "Value"],
                    results.iter().flat_map(|(key, rows)| {
                        rows.iter()
                            .map(move |row| vec![key.clone(), cell(row.kind.as_deref()), cell(row.value)])
                    }),
                )
            })?;
        }
        ModelCommand::Tags { contains } => {
            let names = model.tag_names_containing(contains);
            emit(format, &names, || table(&["Tag"], names.iter().map(|name| vec![name.clone()])))?;
        }
        ModelCommand::Slack => {
            let outcome = model.slack_generator();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                OutputFormat::Table => println!("{}", outcome),
            }
        }
        ModelCommand::Validate { duplicates } => {
            let options = ValidatorOptions {
                check_duplicate_ids: *duplicates || settings.check_duplicate_ids,
            };
            let validator = model.validator(options);
            let issues = if settings.parallel {
                validator.run_parallel()
            } else {
                validator.run()
            };
            if issues.is_empty() && format == OutputFormat::Table {
                println!("No issues found.");
                return Ok(ExitCode::SUCCESS);
            }
            emit(format, &issues, || {
                table(
                    &["Type", "Issue", "Object"],
                    issues.iter().map(|issue| {
                        vec![
                            issue.kind.to_string(),
                            issue.description.to_string(),
                            issue.object.clone(),
                        ]
                    }),
                )
            })?;
            if !issues.is_empty() {
                return Ok(ExitCode::from(1));
            }
        }
        ModelCommand::Summary => {
            let counts: Vec<ClassCount> = model.summary();
            emit(format, &counts, || {
                table(
                    &["Class", "Count"],
                    counts.iter().map(|count| vec![count.class.to_string(), count.count.to_string()]),
                )
            })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.strict |= cli.strict;
    init_logging(&settings.log_level);

    match &cli.command {
        Command::Afrr { imbalance, activation } => {
            run_afrr(imbalance, activation, cli.format)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Model(command) => {
            let model = load_model(cli.model.as_deref(), &settings)?;
            run_model_command(&model, command, cli.format, &settings)
        }
    }
}

mod config;
mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use synthkit_core::{BusinessTypeRegistry, Dataset, Error as CoreError, Stage, classify_description};
use synthkit_eval::{EvalError, check_integrity, dataset_json_schema, validate_dataset_json};
use synthkit_generate::output::write_dataset_csv;
use synthkit_generate::{
    GenerationEngine, GenerationError, GenerationRequest, RequestedCounts, ScenarioKey,
};
use synthkit_store::{DatasetMetadata, DatasetStore, FsDatasetStore, StoreError, envelope};

use config::SynthkitConfig;
use logging::init_logging;

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("dataset not found: {0}")]
    NotFound(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "synthkit", version, about = "Synthetic Stripe-shaped business datasets")]
struct Cli {
    /// Config file (defaults to ./synthkit.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Append JSON logs to this file instead of logging to stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Business type registry JSON overriding the config and built-ins.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset, print it or save it to the store.
    Generate(GenerateArgs),
    /// Print a stored dataset wrapped as {"data": ...}.
    Show(ShowArgs),
    /// Print the metric cards of a generated dataset.
    Metrics(DatasetArgs),
    /// Check a dataset JSON file against the schema and integrity rules.
    Validate(ValidateArgs),
    /// Write a generated dataset as CSV files.
    Export(ExportArgs),
    /// Map a free-text business description to a business type.
    Classify(ClassifyArgs),
    /// List stored dataset ids.
    List,
    /// Business type registry commands.
    #[command(subcommand)]
    Registry(RegistryCommand),
    /// Print the JSON Schema of the dataset contract.
    Schema,
}

#[derive(Subcommand, Debug)]
enum RegistryCommand {
    /// Print the registry, including metric availability, as JSON.
    Dump(DumpArgs),
    /// List registry keys with their metric availability.
    List,
}

#[derive(Args, Debug, Clone)]
struct DatasetArgs {
    /// Business type key; unknown keys use the default profile.
    #[arg(long, short = 'b')]
    business_type: Option<String>,
    /// early, growth or enterprise.
    #[arg(long, short = 's')]
    stage: Option<Stage>,
    #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
    seed: i64,
    #[arg(long, allow_negative_numbers = true)]
    customers: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    plans: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    subscriptions: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    invoices: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    charges: Option<i64>,
}

impl DatasetArgs {
    fn request(&self, config: &SynthkitConfig) -> GenerationRequest {
        let business_type = self
            .business_type
            .clone()
            .unwrap_or_else(|| config.generation.default_business_type.clone());
        let stage = self.stage.unwrap_or(config.generation.default_stage);
        GenerationRequest::new(business_type, stage, self.seed).with_counts(RequestedCounts {
            customers: self.customers,
            plans: self.plans,
            subscriptions: self.subscriptions,
            invoices: self.invoices,
            charges: self.charges,
        })
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Persona the scenario is generated for; part of the scenario id.
    #[arg(long)]
    role: Option<String>,
    /// Save to the dataset store under the scenario id.
    #[arg(long, default_value_t = false)]
    save: bool,
    /// Regenerate even when the scenario id is already stored.
    #[arg(long, default_value_t = false)]
    force: bool,
    /// Write the dataset JSON to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    id: String,
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Dataset JSON file; a bare {"data": ...} envelope is accepted.
    path: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Output directory for the CSV files.
    #[arg(long, default_value = "export")]
    dir: PathBuf,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Business description.
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), &cli.log_level)?;
    let config = SynthkitConfig::load(cli.config.as_deref())?;

    let run_id = Uuid::new_v4().to_string();
    let timer = Instant::now();
    tracing::debug!(event = "run_started", run_id = %run_id);

    let registry_override = cli.registry.as_deref();
    let result = match cli.command {
        Command::Generate(args) => run_generate(&config, registry_override, args),
        Command::Show(args) => run_show(&config, args),
        Command::Metrics(args) => run_metrics(&config, registry_override, args),
        Command::Validate(args) => run_validate(args),
        Command::Export(args) => run_export(&config, registry_override, args),
        Command::Classify(args) => run_classify(&config, registry_override, args),
        Command::List => run_list(&config),
        Command::Registry(command) => run_registry(&config, registry_override, command),
        Command::Schema => print_json(&dataset_json_schema()?, true),
    };

    match &result {
        Ok(()) => tracing::debug!(
            event = "run_finished",
            run_id = %run_id,
            status = "success",
            duration_ms = timer.elapsed().as_millis() as u64
        ),
        Err(err) => tracing::error!(
            event = "run_finished",
            run_id = %run_id,
            status = "failed",
            error = %err
        ),
    }
    result
}

fn open_store(config: &SynthkitConfig) -> FsDatasetStore {
    let store = FsDatasetStore::new(&config.store.root);
    match &config.store.base_url {
        Some(base_url) => store.with_base_url(base_url.clone()),
        None => store,
    }
}

fn generate(
    config: &SynthkitConfig,
    registry: &BusinessTypeRegistry,
    request: &GenerationRequest,
) -> Result<Dataset, CliError> {
    let engine = GenerationEngine::new(registry, config.generate_options()?);
    Ok(engine.generate(request)?)
}

fn run_generate(
    config: &SynthkitConfig,
    registry_override: Option<&Path>,
    args: GenerateArgs,
) -> Result<(), CliError> {
    let registry = config.registry(registry_override)?;
    let request = args.dataset.request(config);
    let role = args.role.unwrap_or_else(|| config.generation.role.clone());
    let key = ScenarioKey::new(
        registry.resolve(&request.business_type).key,
        role,
        request.stage,
        request.seed,
    );
    let id = key.id();

    if args.save {
        let store = open_store(config);
        let fingerprint = request.fingerprint(&config.generate_options()?)?;
        if !args.force {
            if let Some(url) = store.find_reusable(&id, &fingerprint)? {
                tracing::info!(event = "scenario_reused", id = %id, url = %url);
                println!("{url}");
                return Ok(());
            }
            if store.exists(&id)? {
                tracing::info!(
                    event = "scenario_stale",
                    id = %id,
                    "stored scenario was generated from other inputs, regenerating"
                );
            }
        }
        let dataset = serde_json::to_value(generate(config, &registry, &request)?)?;
        let metadata = DatasetMetadata::describe(&dataset).with_request(fingerprint);
        let url = store.save_with_metadata(&id, &dataset, metadata)?;
        tracing::info!(event = "scenario_saved", id = %id, url = %url);
        println!("{url}");
        return Ok(());
    }

    let dataset = generate(config, &registry, &request)?;
    let payload = envelope(serde_json::to_value(&dataset)?);
    match args.out {
        Some(path) => {
            write_json_file(&path, &payload, args.pretty)?;
            tracing::info!(event = "dataset_written", id = %id, path = %path.display());
            Ok(())
        }
        None => print_json(&payload, args.pretty),
    }
}

fn run_show(config: &SynthkitConfig, args: ShowArgs) -> Result<(), CliError> {
    let store = open_store(config);
    let dataset = store
        .load(&args.id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;
    print_json(&envelope(dataset), args.pretty)
}

fn run_metrics(
    config: &SynthkitConfig,
    registry_override: Option<&Path>,
    args: DatasetArgs,
) -> Result<(), CliError> {
    let registry = config.registry(registry_override)?;
    let dataset = generate(config, &registry, &args.request(config))?;
    print_json(
        &json!({
            "businessType": dataset.business_type,
            "stage": dataset.stage,
            "seed": dataset.seed,
            "businessMetrics": dataset.business_metrics,
            "metrics": dataset.metrics,
        }),
        true,
    )
}

#[derive(Debug, Serialize)]
struct ValidationSummary {
    schema_violations: usize,
    integrity_violations: usize,
    records_checked: u64,
    violations: Vec<synthkit_eval::Violation>,
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let content = std::fs::read_to_string(&args.path)?;
    let mut json: Value = serde_json::from_str(&content)?;
    if let Some(inner) = json.get_mut("data").map(Value::take) {
        json = inner;
    }

    let mut violations = validate_dataset_json(&json)?;
    let schema_violations = violations.len();
    let mut records_checked = 0;
    let mut integrity_violations = 0;
    if schema_violations == 0 {
        let dataset: Dataset = serde_json::from_value(json)?;
        let report = check_integrity(dataset.view());
        records_checked = report.checked;
        integrity_violations = report.violations.len();
        violations.extend(report.violations);
    }

    let total = violations.len() as u64;
    print_json(
        &ValidationSummary {
            schema_violations,
            integrity_violations,
            records_checked,
            violations,
        },
        true,
    )?;
    if total > 0 {
        return Err(EvalError::Violations(total).into());
    }
    Ok(())
}

fn run_export(
    config: &SynthkitConfig,
    registry_override: Option<&Path>,
    args: ExportArgs,
) -> Result<(), CliError> {
    let registry = config.registry(registry_override)?;
    let dataset = generate(config, &registry, &args.dataset.request(config))?;
    let summary = write_dataset_csv(&args.dir, &dataset).map_err(CliError::Generation)?;
    tracing::info!(
        event = "csv_exported",
        dir = %args.dir.display(),
        tables = summary.tables.len(),
        bytes_written = summary.bytes_written()
    );
    print_json(&summary, true)
}

fn run_classify(
    config: &SynthkitConfig,
    registry_override: Option<&Path>,
    args: ClassifyArgs,
) -> Result<(), CliError> {
    let registry = config.registry(registry_override)?;
    let text = args.text.join(" ");
    let classification = classify_description(&text);
    let known = registry.contains(&classification.business_type);
    if !known && !classification.matched_keywords.is_empty() {
        tracing::warn!(
            event = "classified_type_missing",
            business_type = %classification.business_type,
            "classified business type is not in the registry, using default profile"
        );
    }
    let resolved = registry.resolve(&classification.business_type);
    print_json(
        &json!({
            "businessType": resolved.key,
            "label": resolved.profile.label,
            "matchedKeywords": classification.matched_keywords,
            "confidence": classification.confidence,
            "availability": resolved.profile.availability,
        }),
        true,
    )
}

fn run_list(config: &SynthkitConfig) -> Result<(), CliError> {
    let store = open_store(config);
    let mut stdout = std::io::stdout().lock();
    for id in store.list()? {
        writeln!(stdout, "{id}")?;
    }
    Ok(())
}

fn run_registry(
    config: &SynthkitConfig,
    registry_override: Option<&Path>,
    command: RegistryCommand,
) -> Result<(), CliError> {
    let registry = config.registry(registry_override)?;
    match command {
        RegistryCommand::Dump(args) => {
            let encoded = registry.to_json_pretty()?;
            match args.out {
                Some(path) => {
                    std::fs::write(&path, encoded)?;
                    tracing::info!(event = "registry_dumped", path = %path.display());
                }
                None => println!("{encoded}"),
            }
            Ok(())
        }
        RegistryCommand::List => {
            let rows: Vec<Value> = registry
                .keys()
                .map(|key| {
                    let profile = registry.resolve(key).profile;
                    json!({
                        "businessType": key,
                        "label": profile.label,
                        "availability": profile.availability,
                    })
                })
                .collect();
            print_json(&rows, true)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{encoded}")?;
    Ok(())
}

fn write_json_file<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let encoded = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    std::fs::write(path, encoded)?;
    Ok(())
}

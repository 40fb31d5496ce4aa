use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use highlight_fixtures::catalog::{catalog_root, FixtureCatalog, DEFAULT_CATALOG_PATH};
use highlight_fixtures::config::{AppConfig, ReportFormat};
use highlight_fixtures::error::{log_catalog_error, log_registry_error};
use highlight_fixtures::predicate::{default_predicates, Construct};
use highlight_fixtures::registry::{Fixture, FixtureRegistry, FixtureReport, Language};
use highlight_fixtures::report::{RequiredPredicates, ValidationReport};

fn main() -> ExitCode {
    highlight_fixtures::init_logging();
    let cli = Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fixture-check error: {err:?}");
            ExitCode::from(1)
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "fixture-check",
    about = "Validate that highlighter fixtures still exercise their required constructs"
)]
struct Cli {
    /// JSON config file (defaults to assets/fixture_config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the fixture catalog location
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Override the directory fixture paths are resolved against
    #[arg(long, global = true)]
    fixtures_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate catalog fixtures against every registered predicate.
    Validate(ValidateArgs),
    /// Validate a single file against the built-in constructs.
    Check(CheckArgs),
    /// List fixtures declared by the catalog.
    List,
    /// List predicate names available to catalogs.
    Predicates,
}

#[derive(Args, Debug, Clone)]
struct ValidateArgs {
    /// Only validate the named fixture.
    #[arg(long)]
    fixture: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct CheckArgs {
    /// Source file to validate.
    #[arg(long)]
    file: PathBuf,
    /// Fixture name used in the report (defaults to the file name).
    #[arg(long)]
    name: Option<String>,
    /// Required predicate; repeat for several (defaults to the configured set).
    #[arg(long = "require", value_name = "PREDICATE")]
    require: Vec<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Report format (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Also write the JSON report to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => ReportFormat::Table,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    fn execute(self) -> Result<ExitCode> {
        let config = match &self.config {
            Some(path) => AppConfig::load_from_file(path),
            None => AppConfig::load(),
        };
        let ctx = Harness {
            catalog_path: self
                .catalog
                .clone()
                .unwrap_or_else(|| config.registry.catalog_path.clone()),
            fixtures_dir: self
                .fixtures_dir
                .clone()
                .or_else(|| config.registry.fixtures_dir.clone()),
            config,
        };

        match self.command {
            Command::Validate(args) => validate_command(&ctx, args),
            Command::Check(args) => check_command(&ctx, args),
            Command::List => list_command(&ctx),
            Command::Predicates => predicates_command(&ctx),
        }
    }
}

struct Harness {
    config: AppConfig,
    catalog_path: PathBuf,
    fixtures_dir: Option<PathBuf>,
}

impl Harness {
    fn load_catalog(&self) -> Result<FixtureCatalog> {
        let loaded = if self.catalog_path == Path::new(DEFAULT_CATALOG_PATH) {
            FixtureCatalog::load_from_default()
        } else {
            FixtureCatalog::load(&self.catalog_path)
        };
        loaded
            .inspect_err(|err| log_catalog_error(err, "fixture-check"))
            .with_context(|| format!("loading catalog {}", self.catalog_path.display()))
    }

    fn root(&self) -> PathBuf {
        self.fixtures_dir
            .clone()
            .unwrap_or_else(|| catalog_root(&self.catalog_path))
    }

    fn format(&self, args: &OutputArgs) -> ReportFormat {
        args.format
            .map(ReportFormat::from)
            .unwrap_or(self.config.report.format)
    }
}

fn validate_command(ctx: &Harness, args: ValidateArgs) -> Result<ExitCode> {
    let catalog = ctx.load_catalog()?;
    let registry = catalog
        .into_registry(&ctx.root())
        .inspect_err(|err| log_catalog_error(err, "fixture-check validate"))
        .context("building fixture registry")?;
    let required = catalog.required(ctx.config.registry.required_predicates.clone());

    let report = match &args.fixture {
        Some(name) => {
            let results = registry
                .validate(name)
                .inspect_err(|err| log_registry_error(err, "fixture-check validate"))?;
            let single = FixtureReport {
                fixture: name.clone(),
                results,
            };
            ValidationReport::build([single], &required)
        }
        None => ValidationReport::build(registry.validate_all(), &required),
    };

    emit_report(ctx, &report, &args.output)
}

fn check_command(ctx: &Harness, args: CheckArgs) -> Result<ExitCode> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let name = match args.name {
        Some(name) => name,
        None => args
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| "fixture".to_string()),
    };

    let mut registry = FixtureRegistry::new();
    for predicate in default_predicates() {
        registry.push_predicate(predicate)?;
    }
    let fixture =
        Fixture::new(name.clone(), content).with_language(Language::from_path(&args.file));
    registry
        .register_fixture(fixture)
        .inspect_err(|err| log_registry_error(err, "fixture-check check"))?;

    let mut required =
        RequiredPredicates::with_default(ctx.config.registry.required_predicates.clone());
    if !args.require.is_empty() {
        required.insert(name, args.require.clone());
    }
    let report = ValidationReport::build(registry.validate_all(), &required);
    emit_report(ctx, &report, &args.output)
}

fn list_command(ctx: &Harness) -> Result<ExitCode> {
    let catalog = ctx.load_catalog()?;
    for fixture in &catalog.fixtures {
        let language = fixture
            .language
            .map(|language| language.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} -> {} ({}, {} required)",
            fixture.name,
            fixture.source_label(),
            language,
            fixture.required.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn predicates_command(ctx: &Harness) -> Result<ExitCode> {
    for construct in Construct::ALL {
        println!("{:<24} {}", construct.name(), construct.description());
    }
    match ctx.load_catalog() {
        Ok(catalog) => {
            for predicate in &catalog.predicates {
                let kind = predicate.check.to_check()?.kind();
                println!("{:<24} catalog {}", predicate.name, kind);
            }
        }
        Err(err) => eprintln!("fixture-check: catalog predicates unavailable: {err:#}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn emit_report(
    ctx: &Harness,
    report: &ValidationReport,
    output: &OutputArgs,
) -> Result<ExitCode> {
    if let Some(path) = &output.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("creating report output directory")?;
        }
        let json = report.to_json_pretty().context("serializing report")?;
        fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
    }

    match ctx.format(output) {
        ReportFormat::Json => {
            let json = report.to_json_pretty().context("serializing report")?;
            println!("{json}");
        }
        ReportFormat::Table => print!("{}", report.render_table()),
    }

    if report.summary.fixtures == 0 {
        bail!("no fixtures were validated");
    }
    if report.has_anomalies() && ctx.config.report.fail_on_anomaly {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

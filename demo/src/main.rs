//! Interview form runtime demo CLI
//!
//! Loads a question schema the way an interview shell would and reports what
//! the runtime derives from it.
//!
//! Usage:
//!   cargo run -p demo -- inspect --schema demo/fixtures/about_you.json
//!   cargo run -p demo -- validate --schema demo/fixtures/about_you.json \
//!       --values demo/fixtures/answers.json --config demo/fixtures/messages.toml

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use interview_config::ValidationConfig;
use interview_contracts::{
    error::{InterviewError, InterviewResult},
    schema::{FieldType, Schema},
};
use interview_state::{
    button_options, displayable_component, is_required, select_options, FieldComponent,
    InterviewForm, StateFactory,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Schema-driven interview form runtime demo.
#[derive(Parser)]
#[command(
    name = "interview-demo",
    about = "Interview form runtime demo",
    long_about = "Inspects question schemas and validates answer sets against them\n\
                  using the same engine, factory and form an interview shell uses."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an answer set against a question schema.
    Validate {
        /// Question schema (JSON).
        #[arg(long)]
        schema: PathBuf,
        /// Answers to assign to the form (JSON object). Defaults to `{}`.
        #[arg(long)]
        values: Option<PathBuf>,
        /// Validation config with message templates (TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the field tree a shell would render for a question schema.
    Inspect {
        /// Question schema (JSON).
        #[arg(long)]
        schema: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate {
            schema,
            values,
            config,
        } => run_validate(&schema, values.as_deref(), config.as_deref()),
        Command::Inspect { schema } => run_inspect(&schema),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(2);
        }
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Returns whether the answers are valid.
fn run_validate(
    schema_path: &Path,
    values_path: Option<&Path>,
    config_path: Option<&Path>,
) -> InterviewResult<bool> {
    let config = match config_path {
        Some(path) => ValidationConfig::from_file(path)?,
        None => ValidationConfig::default(),
    };
    let schema = Schema::from_value(read_json(schema_path)?)?;
    let values = match values_path {
        Some(path) => Some(into_object(read_json(path)?, path)?),
        None => None,
    };

    let factory = StateFactory::with_config(config);
    let mut form = InterviewForm::new(&factory, &schema, values)?;
    form.state_mut().set_touched(true);

    let state = form.state();
    let errors = state.field_errors();
    info!(
        title = schema.title_or("-"),
        errors = errors.len(),
        "answers validated"
    );

    println!("{}", pretty(&Value::Object(form.values())));
    println!();
    if errors.is_empty() {
        println!("valid");
    } else {
        println!("invalid:");
        for error in &errors {
            println!("  {:<24} {}", error.path, error.message);
        }
    }

    Ok(state.is_valid())
}

// ── inspect ───────────────────────────────────────────────────────────────────

fn run_inspect(schema_path: &Path) -> InterviewResult<bool> {
    let schema = Schema::from_value(read_json(schema_path)?)?;

    // Compile first so configuration errors surface before anything prints.
    StateFactory::default().compile(&schema)?;

    println!("{}", schema.title_or("(untitled)"));
    print_properties(&schema, 1);
    Ok(true)
}

fn print_properties(schema: &Schema, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, child) in schema.properties.iter().flatten() {
        let marker = if is_required(child, schema.is_required_property(name)) {
            "*"
        } else {
            " "
        };
        let kind = match (displayable_component(child), &child.field_type) {
            (Some(component), _) => format!("{component:?}"),
            (None, Some(FieldType::Button)) => "Buttons".to_string(),
            (None, _) => "(hidden)".to_string(),
        };
        println!("{indent}{marker} {name:<20} {kind:<20} {}", child.title_or(""));

        for option in select_options(child) {
            println!(
                "{indent}      - {} = {}",
                option.label.as_deref().unwrap_or("-"),
                option.value
            );
        }
        for button in button_options(child) {
            let flags = match (button.primary, button.is_default) {
                (true, true) => " [primary, default]",
                (true, false) => " [primary]",
                (false, true) => " [default]",
                (false, false) => "",
            };
            println!(
                "{indent}      [{}] = {}{flags}",
                button.label.as_deref().unwrap_or("-"),
                button.value
            );
        }

        if displayable_component(child) == Some(FieldComponent::Object) {
            print_properties(child, depth + 1);
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_json(path: &Path) -> InterviewResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| InterviewError::ConfigError {
        reason: format!("cannot read '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&text).map_err(|e| InterviewError::ConfigError {
        reason: format!("'{}' is not valid JSON: {}", path.display(), e),
    })
}

fn into_object(value: Value, path: &Path) -> InterviewResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(InterviewError::ConfigError {
            reason: format!("'{}' must contain a JSON object", path.display()),
        }),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

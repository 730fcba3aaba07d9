//! `inmo` command-line tool for clause bodies

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use inmo_catalog::{available_variables, collection_entities_with_labels, entity_label, entity_properties};
use inmo_content::{
    detect_content_format, parse_structured_content, serialize_structured_content, validate_json,
    ContentFormat, ValidationReport,
};
use inmo_core::{ClauseConfig, ClauseDraft, ClauseTemplate};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn cli() -> Command {
    let file = || {
        Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Stored clause body")
    };

    Command::new("inmo")
        .version(clap::crate_version!())
        .about("Inspect and validate contract clause bodies")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with clause limits"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("detect")
                .about("Print whether a body is structured or plain")
                .arg(file()),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate structured content")
                .arg(file()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Drop malformed parts and re-serialize")
                .arg(file()),
        )
        .subcommand(
            Command::new("check")
                .about("Run the submission checks on a body")
                .arg(file())
                .arg(
                    Arg::new("title")
                        .long("title")
                        .required(true)
                        .help("Clause title"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("General")
                        .help("Clause category label"),
                ),
        )
        .subcommand(
            Command::new("catalog")
                .about("List entities, properties and insertable variables")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_body(args: &ArgMatches) -> Result<String> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("missing file argument")?;
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(matches: &ArgMatches) -> Result<ClauseConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => ClauseConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ClauseConfig::default()),
    }
}

/// Report for structured bodies, `None` for plain text
fn validate(raw: &str) -> Result<Option<ValidationReport>> {
    if detect_content_format(raw) == ContentFormat::Plain {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(raw).context("structured body is not JSON")?;
    Ok(Some(validate_json(&value)))
}

fn print_validation(report: Option<ValidationReport>) -> ExitCode {
    match report {
        None => {
            println!("ok (plain text)");
            ExitCode::SUCCESS
        }
        Some(report) if report.valid => {
            println!("ok");
            ExitCode::SUCCESS
        }
        Some(report) => {
            for message in report.messages() {
                println!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

fn normalize(raw: &str) -> Result<()> {
    match parse_structured_content(raw) {
        Some(content) => println!("{}", serialize_structured_content(&content)?),
        None => print!("{}", raw),
    }
    Ok(())
}

fn check(args: &ArgMatches, raw: String, config: &ClauseConfig) -> Result<ExitCode> {
    let title = args.get_one::<String>("title").context("missing title")?;
    let category = args.get_one::<String>("category").context("missing category")?;

    match ClauseTemplate::create(ClauseDraft::new(title, category, raw), Uuid::nil(), config) {
        Ok(template) => {
            println!("ok ({}, {})", template.category, template.format());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            for message in e.messages() {
                println!("{}", message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn catalog(json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "variables": available_variables(),
            "collections": collection_entities_with_labels(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for entity in ["propiedad", "propietario", "inquilino"] {
        let label = entity_label(entity).unwrap_or(entity);
        println!("{} ({})", label, entity);
        for (property, property_label) in entity_properties(entity).into_iter().flatten() {
            println!("  {}.{}  {}", entity, property, property_label);
        }
    }
    println!();
    println!("Iterable collections:");
    for (name, label) in collection_entities_with_labels() {
        println!("  {}  {}", name, label);
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));
    let config = load_config(&matches)?;
    tracing::debug!(?config, "starting");

    match matches.subcommand() {
        Some(("detect", args)) => {
            println!("{}", detect_content_format(&read_body(args)?));
            Ok(ExitCode::SUCCESS)
        }
        Some(("validate", args)) => Ok(print_validation(validate(&read_body(args)?)?)),
        Some(("normalize", args)) => {
            normalize(&read_body(args)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("check", args)) => check(args, read_body(args)?, &config),
        Some(("catalog", args)) => {
            catalog(args.get_flag("json"))?;
            Ok(ExitCode::SUCCESS)
        }
        _ => unreachable!("subcommand is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["inmo", "validate", "body.json", "-v", "--config", "inmo.toml"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("inmo.toml"))
        );
    }

    #[test]
    fn check_defaults_category() {
        let matches = cli()
            .try_get_matches_from(["inmo", "check", "body.txt", "--title", "Pago"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<String>("category").map(String::as_str), Some("General"));
    }

    #[test]
    fn validate_reports_failure() {
        let raw = r#"{"type":"structured","parts":[{"type":"variable","path":"propiedad.color"}]}"#;
        let report = validate(raw).unwrap().unwrap();
        assert_eq!(report.messages(), vec!["part 1: path 'propiedad.color' is invalid"]);
        assert!(validate("texto libre").unwrap().is_none());
    }
}

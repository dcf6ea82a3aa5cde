//! Command-line interface implementation for create-sparc.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Command-line arguments structure for create-sparc.
#[derive(Parser, Debug)]
#[command(author, version, about = "create-sparc: template-driven project scaffolding", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging output, including error causes
    #[arg(long, global = true)]
    pub debug: bool,

    /// Settings file (default: ~/.create-sparc/config.json)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing the templates, overriding the settings file
    #[arg(long, value_name = "DIR", global = true)]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new project from a template
    Init {
        /// Name of the project to create
        #[arg(value_name = "NAME")]
        name: String,

        /// Template to use (default: the configured default template)
        #[arg(short, long)]
        template: Option<String>,

        /// Directory to create the project in (default: <NAME>)
        #[arg(short, long, value_name = "DIR")]
        directory: Option<PathBuf>,

        /// Template variable as KEY=VALUE; objects, arrays, true/false/null are parsed as JSON
        #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
        vars: Vec<(String, serde_json::Value)>,

        /// Execute the template's post-generation hook without asking
        #[arg(long)]
        run_hooks: bool,
    },

    /// List available templates
    List,

    /// Show a template's manifest
    Info {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Check that a template is complete and its files exist
    Validate {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },
}

/// Parses a `KEY=VALUE` pair.
///
/// `VALUE` is decoded as JSON only when it is a literal `true`, `false` or
/// `null`, or starts with `{` or `[` and parses. Everything else, numbers
/// included, stays a string so that values like `1.10` are kept verbatim.
pub fn parse_var(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty variable name in '{raw}'"));
    }
    Ok((key.to_string(), parse_value(value)))
}

fn parse_value(value: &str) -> serde_json::Value {
    let trimmed = value.trim();
    let structured = matches!(trimmed, "true" | "false" | "null")
        || trimmed.starts_with('{')
        || trimmed.starts_with('[');
    if structured {
        if let Ok(parsed) = serde_json::from_str(trimmed) {
            return parsed;
        }
    }
    serde_json::Value::String(value.to_string())
}

/// Collects `--var` pairs into an ordered map; later duplicates win.
pub fn vars_to_map(vars: Vec<(String, serde_json::Value)>) -> IndexMap<String, serde_json::Value> {
    vars.into_iter().collect()
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if a required argument is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

//! create-sparc's main application entry point.
//! Parses the command line, loads settings and dispatches to the template
//! manager or project generator.

use create_sparc::{
    cli::{get_args, vars_to_map, Args, Command},
    config::Settings,
    error::{default_error_handler, Result},
    generator::{GenerateRequest, ProjectGenerator},
    logger::init_logger,
    manifest::FileSpec,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose, args.debug);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// Every failure is returned as an error so that `main` prints a single line
/// and exits with status 1.
fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(templates_dir) = args.templates_dir {
        settings.templates_dir = templates_dir;
    }
    let generator = ProjectGenerator::new(settings);
    let manager = generator.manager();

    match args.command {
        Command::Init { name, template, directory, vars, run_hooks } => {
            let request = GenerateRequest {
                project_name: name,
                template_name: template,
                output_dir: directory,
                variables: vars_to_map(vars),
                run_hooks,
            };
            let report = generator.generate(&request)?;
            for file in &report.files {
                println!("{}: '{}'", file.action, file.target.display());
            }
            println!(
                "Project '{}' generated successfully in {}.",
                request.project_name,
                report.output_dir.display()
            );
        }
        Command::List => {
            let templates = manager.list_templates()?;
            if templates.is_empty() {
                println!("No templates found in {}.", manager.registry().templates_dir().display());
            }
            for name in templates {
                println!("{name}");
            }
        }
        Command::Info { template } => {
            let manifest = manager.get_template_info(&template)?;
            println!("Name:        {}", manifest.name.as_deref().unwrap_or("-"));
            println!("Version:     {}", manifest.version.as_deref().unwrap_or("-"));
            println!("Description: {}", manifest.description.as_deref().unwrap_or("-"));
            match &manifest.files {
                FileSpec::Explicit(paths) => println!("Files:       {}", paths.join(", ")),
                FileSpec::Legacy => println!("Files:       files/ directory"),
            }
            for (name, value) in &manifest.variables {
                println!("Variable:    {name} = {value}");
            }
            if !manifest.required_variables.is_empty() {
                println!("Required:    {}", manifest.required_variables.join(", "));
            }
        }
        Command::Validate { template } => {
            manager.try_validate_template(&template)?;
            println!("Template '{template}' is valid.");
        }
    }
    Ok(())
}

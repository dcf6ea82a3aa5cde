//! Project generation: resolves which template to use and where to write it,
//! applies the template and runs post-generation steps.

use crate::applier::ApplyReport;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fs;
use crate::hooks::{get_post_hook, run_hook};
use crate::manager::TemplateManager;
use indexmap::IndexMap;
use log::{info, warn};
use std::path::PathBuf;

/// Parameters of one `init` run.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub project_name: String,
    /// Template to use; the configured default when `None`.
    pub template_name: Option<String>,
    /// Destination directory; `./<project_name>` when `None`.
    pub output_dir: Option<PathBuf>,
    pub variables: IndexMap<String, serde_json::Value>,
    /// Execute the template's post-generation hook if it has one.
    pub run_hooks: bool,
}

impl GenerateRequest {
    pub fn new<S: Into<String>>(project_name: S) -> Self {
        Self { project_name: project_name.into(), ..Default::default() }
    }
}

pub struct ProjectGenerator {
    settings: Settings,
    manager: TemplateManager,
}

impl ProjectGenerator {
    pub fn new(settings: Settings) -> Self {
        let manager = TemplateManager::new(&settings.templates_dir);
        Self { settings, manager }
    }

    pub fn manager(&self) -> &TemplateManager {
        &self.manager
    }

    /// Generates a project.
    ///
    /// When applying fails and the output directory did not exist before this
    /// run, the partially written directory is removed again.
    ///
    /// # Errors
    /// * `Error::NoTemplates` if the templates root holds no template
    /// * `Error::TemplateNotFound` if the requested template is not available
    /// * Any error from validating or applying the template, or from the hook
    pub fn generate(&self, request: &GenerateRequest) -> Result<ApplyReport> {
        let template_name = match &request.template_name {
            Some(name) => name.clone(),
            None => {
                info!("Using default template: {}", self.settings.default_template);
                self.settings.default_template.clone()
            }
        };

        let available = self.manager.list_templates()?;
        if available.is_empty() {
            return Err(Error::NoTemplates {
                templates_dir: self.settings.templates_dir.clone(),
            });
        }
        if !available.contains(&template_name) {
            info!("Available templates: {}", available.join(", "));
            return Err(Error::TemplateNotFound { name: template_name });
        }

        let output_dir =
            request.output_dir.clone().unwrap_or_else(|| PathBuf::from(&request.project_name));
        let created_output_dir = !fs::exists(&output_dir);

        info!(
            "Generating project '{}' using template '{}'",
            request.project_name, template_name
        );
        let report = match self.manager.try_apply_template(
            &template_name,
            &request.project_name,
            &output_dir,
            &request.variables,
        ) {
            Ok(report) => report,
            Err(err) => {
                if created_output_dir && fs::exists(&output_dir) {
                    warn!("Removing partially generated {}", output_dir.display());
                    if let Err(cleanup) = fs::remove_dir_all(&output_dir) {
                        warn!("{cleanup}");
                    }
                }
                return Err(err);
            }
        };

        self.post_process(&template_name, &report, request.run_hooks)?;
        Ok(report)
    }

    fn post_process(&self, template_name: &str, report: &ApplyReport, run_hooks: bool) -> Result<()> {
        let template_dir = self.manager.registry().template_dir(template_name);
        let post_hook = get_post_hook(&template_dir);
        if !fs::is_file(&post_hook) {
            return Ok(());
        }
        if !run_hooks {
            warn!(
                "Template '{template_name}' has a post-generation hook; rerun with --run-hooks to execute it"
            );
            return Ok(());
        }
        run_hook(&template_dir, &report.output_dir, &post_hook, &report.context)
    }
}

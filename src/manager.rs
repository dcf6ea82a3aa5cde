//! Consumer-facing template API.
//!
//! `TemplateManager` ties the registry, validator, context builder, renderer
//! and applier together behind four calls. The `bool`-returning calls log the
//! failure and are meant for command handlers; the `try_` variants return the
//! error itself.

use crate::applier::{ApplyReport, Applier};
use crate::context::ContextBuilder;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::registry::TemplateRegistry;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::validator::TemplateValidator;
use indexmap::IndexMap;
use log::{error, info};
use std::path::{Path, PathBuf};

pub struct TemplateManager {
    registry: TemplateRegistry,
    renderer: Box<dyn TemplateRenderer>,
}

impl TemplateManager {
    /// Creates a manager over `templates_dir` using the MiniJinja renderer.
    pub fn new<P: Into<PathBuf>>(templates_dir: P) -> Self {
        Self::with_renderer(templates_dir, Box::new(MiniJinjaRenderer::new()))
    }

    pub fn with_renderer<P: Into<PathBuf>>(
        templates_dir: P,
        renderer: Box<dyn TemplateRenderer>,
    ) -> Self {
        Self { registry: TemplateRegistry::new(templates_dir), renderer }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn list_templates(&self) -> Result<Vec<String>> {
        self.registry.list_templates()
    }

    /// Loads the manifest of template `name` without validating it.
    pub fn get_template_info(&self, name: &str) -> Result<Manifest> {
        self.registry.load(name)
    }

    /// Returns true if template `name` loads and passes validation.
    pub fn validate_template(&self, name: &str) -> bool {
        match self.try_validate_template(name) {
            Ok(_) => true,
            Err(e) => {
                error!("{e}");
                false
            }
        }
    }

    pub fn try_validate_template(&self, name: &str) -> Result<Manifest> {
        TemplateValidator::new(self.registry.clone()).validate(name)
    }

    /// Generates project `project_name` from template `name` into `output_dir`.
    ///
    /// Returns false, after logging the reason, on any validation, variable or
    /// filesystem failure. Files written before a failure are left in place.
    pub fn apply_template<P: AsRef<Path>>(
        &self,
        name: &str,
        project_name: &str,
        output_dir: P,
        extra_vars: &IndexMap<String, serde_json::Value>,
    ) -> bool {
        match self.try_apply_template(name, project_name, output_dir, extra_vars) {
            Ok(_) => true,
            Err(e) => {
                error!("Error applying template '{name}': {e}");
                false
            }
        }
    }

    pub fn try_apply_template<P: AsRef<Path>>(
        &self,
        name: &str,
        project_name: &str,
        output_dir: P,
        extra_vars: &IndexMap<String, serde_json::Value>,
    ) -> Result<ApplyReport> {
        let manifest = self.try_validate_template(name)?;
        let context = ContextBuilder::build(project_name, &manifest, extra_vars)?;

        let output_dir = output_dir.as_ref();
        info!("Applying template '{name}' to {}", output_dir.display());
        Applier::new(self.registry.clone(), self.renderer.as_ref()).apply_validated(
            name,
            &manifest,
            output_dir,
            &context,
        )
    }
}

//! Structural validation of templates.

use crate::constants::LEGACY_FILES_DIR;
use crate::error::{Error, Result};
use crate::fs;
use crate::manifest::{FileSpec, Manifest};
use crate::registry::TemplateRegistry;
use log::debug;
use std::path::{Component, Path};

/// Returns true if `path` is relative and only made of normal segments.
///
/// Such a path can be joined onto a directory without escaping it.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.trim().is_empty() || path.split(['/', '\\']).any(|segment| segment.is_empty()) {
        return false;
    }
    Path::new(path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Checks that a template's manifest is complete and that its files exist.
#[derive(Debug, Clone)]
pub struct TemplateValidator {
    registry: TemplateRegistry,
}

impl TemplateValidator {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Loads and validates template `name`, returning its manifest on success.
    ///
    /// Validation never partially succeeds: the first problem found fails the
    /// whole template.
    ///
    /// # Errors
    /// * Load failures (`TemplateNotFound`, `ManifestNotFound`, `ManifestParseError`)
    /// * `Error::TemplateInvalid` naming the first problem found
    pub fn validate(&self, name: &str) -> Result<Manifest> {
        let manifest = self.registry.load(name)?;
        self.check(name, &manifest)?;
        debug!("Template '{name}' is valid");
        Ok(manifest)
    }

    /// Validates an already loaded manifest of template `name`.
    pub fn check(&self, name: &str, manifest: &Manifest) -> Result<()> {
        let invalid = |reason: String| Error::TemplateInvalid { name: name.to_string(), reason };

        for (field, value) in [
            ("name", &manifest.name),
            ("version", &manifest.version),
            ("description", &manifest.description),
        ] {
            if value.is_none() {
                return Err(invalid(format!("missing required field '{field}'")));
            }
        }

        let template_dir = self.registry.template_dir(name);
        let legacy_dir = template_dir.join(LEGACY_FILES_DIR);

        match &manifest.files {
            FileSpec::Explicit(paths) => {
                if !paths.is_empty() && fs::is_dir(&legacy_dir) {
                    return Err(invalid(format!(
                        "both a '{LEGACY_FILES_DIR}/' directory and an explicit file list are present"
                    )));
                }
                for rel_path in paths {
                    if !is_safe_relative_path(rel_path) {
                        return Err(invalid(format!("declared path '{rel_path}' is not relative")));
                    }
                    let file_path = template_dir.join(rel_path);
                    if !fs::is_file(&file_path) {
                        return Err(invalid(format!(
                            "declared file not found: '{}'",
                            file_path.display()
                        )));
                    }
                }
            }
            FileSpec::Legacy => {
                if !fs::is_dir(&legacy_dir) {
                    return Err(invalid(format!(
                        "files directory not found: '{}'",
                        legacy_dir.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

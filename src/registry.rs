//! Template discovery under a templates root.

use crate::error::Result;
use crate::fs;
use crate::manifest::{find_manifest, Manifest, ManifestLoader};
use log::debug;
use std::path::{Path, PathBuf};

/// Enumerates templates living under a templates root directory.
///
/// A subdirectory is a template iff it contains a manifest file. Nothing is
/// cached: every query reads the filesystem again.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates_dir: PathBuf,
}

impl TemplateRegistry {
    pub fn new<P: Into<PathBuf>>(templates_dir: P) -> Self {
        Self { templates_dir: templates_dir.into() }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Directory of template `name` (which may not exist).
    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.templates_dir.join(name)
    }

    /// Names of all templates, sorted by directory name.
    ///
    /// An absent or empty templates root yields an empty list.
    pub fn list_templates(&self) -> Result<Vec<String>> {
        if !fs::is_dir(&self.templates_dir) {
            debug!("Templates directory {} does not exist", self.templates_dir.display());
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        for entry in fs::list_dir(&self.templates_dir)? {
            if !fs::is_dir(&entry) || find_manifest(&entry).is_none() {
                continue;
            }
            match entry.file_name().and_then(|n| n.to_str()) {
                Some(name) => templates.push(name.to_string()),
                None => debug!("Skipping template with non UTF-8 name: {}", entry.display()),
            }
        }
        Ok(templates)
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.list_templates()?.iter().any(|t| t == name))
    }

    pub fn loader(&self) -> ManifestLoader {
        ManifestLoader::new(&self.templates_dir)
    }

    /// Loads the manifest of template `name`.
    pub fn load(&self, name: &str) -> Result<Manifest> {
        self.loader().load(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TemplateRegistry::new(temp_dir.path().join("absent"));
        assert!(registry.list_templates().unwrap().is_empty());
    }

    #[test]
    fn test_only_dirs_with_manifest_qualify() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write_file(root.join("beta/template.json"), "{}").unwrap();
        fs::write_file(root.join("alpha/template.yaml"), "name: a").unwrap();
        fs::create_dir_all(root.join("no_manifest")).unwrap();
        fs::write_file(root.join("stray.json"), "{}").unwrap();

        let registry = TemplateRegistry::new(root);
        assert_eq!(registry.list_templates().unwrap(), vec!["alpha", "beta"]);
        assert!(registry.contains("beta").unwrap());
        assert!(!registry.contains("no_manifest").unwrap());
    }
}

//! Template manifest model and loader.
//!
//! A manifest (`template.json`, `template.yml` or `template.yaml`) describes a
//! template's identity, its file set and its variables. The file set is
//! resolved once, at load time, into a [`FileSpec`].

use crate::constants::{LEGACY_FILES_DIR, MANIFEST_FILES};
use crate::error::{Error, Result};
use crate::fs;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The set of files a template contributes to a generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "paths", rename_all = "snake_case")]
pub enum FileSpec {
    /// Relative paths (from the template directory) in declared order.
    Explicit(Vec<String>),
    /// Every file under the template's `files/` directory, recursively.
    Legacy,
}

/// A parsed template manifest.
///
/// The descriptive fields stay optional here: their absence is a validation
/// failure, not a parse failure.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub files: FileSpec,
    /// Default variable values, in declaration order.
    pub variables: IndexMap<String, serde_json::Value>,
    pub required_variables: Vec<String>,
}

/// On-disk shape of the manifest document.
#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    variables: Option<IndexMap<String, serde_json::Value>>,
    #[serde(default)]
    required_variables: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

impl Manifest {
    /// Parses manifest content read from `path`.
    ///
    /// `template_dir` is consulted only to resolve an empty `files` list: it
    /// means the legacy convention when a `files/` directory exists, and a
    /// template without files otherwise.
    pub fn parse(content: &str, path: &Path, template_dir: &Path) -> Result<Self> {
        let raw: RawManifest = match Format::from_path(path) {
            Format::Json => serde_json::from_str::<RawManifest>(content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str::<RawManifest>(content).map_err(|e| e.to_string()),
        }
        .map_err(|message| Error::ManifestParseError { path: path.to_path_buf(), message })?;

        let files = match raw.files {
            None => FileSpec::Legacy,
            Some(list) if list.is_empty() && fs::is_dir(template_dir.join(LEGACY_FILES_DIR)) => {
                FileSpec::Legacy
            }
            Some(list) => FileSpec::Explicit(list),
        };

        Ok(Self {
            name: raw.name,
            version: raw.version,
            description: raw.description,
            files,
            variables: raw.variables.unwrap_or_default(),
            required_variables: raw.required_variables.unwrap_or_default(),
        })
    }
}

/// Returns the manifest path inside `template_dir`, if any of the supported names exists.
pub fn find_manifest<P: AsRef<Path>>(template_dir: P) -> Option<PathBuf> {
    let template_dir = template_dir.as_ref();
    MANIFEST_FILES
        .iter()
        .map(|file| template_dir.join(file))
        .find(|path| fs::is_file(path))
}

/// Loads manifests of templates living under a templates root.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    templates_dir: PathBuf,
}

impl ManifestLoader {
    pub fn new<P: Into<PathBuf>>(templates_dir: P) -> Self {
        Self { templates_dir: templates_dir.into() }
    }

    /// Loads the manifest of template `name`, reading it fresh from disk.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the template directory does not exist
    /// * `Error::ManifestNotFound` if it holds no manifest file
    /// * `Error::ManifestParseError` if the manifest cannot be parsed
    pub fn load(&self, name: &str) -> Result<Manifest> {
        let template_dir = self.templates_dir.join(name);
        if !fs::is_dir(&template_dir) {
            return Err(Error::TemplateNotFound { name: name.to_string() });
        }

        let manifest_path = find_manifest(&template_dir).ok_or_else(|| Error::ManifestNotFound {
            path: template_dir.join(MANIFEST_FILES[0]),
        })?;

        debug!("Loading manifest from {}", manifest_path.display());
        let content = fs::read_file(&manifest_path)?;
        Manifest::parse(&content, &manifest_path, &template_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse_json(content: &str, template_dir: &Path) -> Result<Manifest> {
        Manifest::parse(content, &template_dir.join("template.json"), template_dir)
    }

    #[test]
    fn test_files_omitted_is_legacy() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = parse_json(r#"{"name": "t"}"#, temp_dir.path()).unwrap();
        assert_eq!(manifest.files, FileSpec::Legacy);
        assert!(manifest.variables.is_empty());
        assert!(manifest.required_variables.is_empty());
    }

    #[test]
    fn test_empty_files_depends_on_legacy_dir() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = parse_json(r#"{"files": []}"#, temp_dir.path()).unwrap();
        assert_eq!(manifest.files, FileSpec::Explicit(vec![]));

        fs::create_dir_all(temp_dir.path().join("files")).unwrap();
        let manifest = parse_json(r#"{"files": []}"#, temp_dir.path()).unwrap();
        assert_eq!(manifest.files, FileSpec::Legacy);
    }

    #[test]
    fn test_variables_keep_declaration_order() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = parse_json(
            r#"{"files": ["a.txt"], "variables": {"zeta": 1, "alpha": true, "mid": "x"}}"#,
            temp_dir.path(),
        )
        .unwrap();
        let keys: Vec<_> = manifest.variables.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(manifest.files, FileSpec::Explicit(vec!["a.txt".to_string()]));
    }

    #[test]
    fn test_yaml_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let content = "name: demo\nversion: 1.0.0\ndescription: A demo\nfiles:\n  - README.md\nrequired_variables:\n  - license\n";
        let manifest =
            Manifest::parse(content, &temp_dir.path().join("template.yaml"), temp_dir.path())
                .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert_eq!(manifest.required_variables, vec!["license"]);
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = parse_json(r#"{"files": 3}"#, temp_dir.path());
        assert!(matches!(result, Err(Error::ManifestParseError { .. })));
    }
}

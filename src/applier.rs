//! Materializes a template into an output directory.
//!
//! Every destination path is rendered before use, so path segments such as
//! `{{project_name}}` resolve to variable values. Files whose extension is on
//! the text allow-list have their content rendered too; all others are copied
//! byte-for-byte.

use crate::constants::{LEGACY_FILES_DIR, TEXT_EXTENSIONS};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::fs;
use crate::manifest::{FileSpec, Manifest};
use crate::registry::TemplateRegistry;
use crate::renderer::{RenderPolicy, TemplateRenderer};
use crate::validator::{is_safe_relative_path, TemplateValidator};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What happened to a single template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Content was rendered before writing.
    Rendered,
    /// Content was copied without rendering.
    Copied,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileAction::Rendered => write!(f, "Rendered"),
            FileAction::Copied => write!(f, "Copied"),
        }
    }
}

/// One file written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub source: PathBuf,
    pub target: PathBuf,
    pub action: FileAction,
}

/// Outcome of a successful apply, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub output_dir: PathBuf,
    /// Context the files were rendered with.
    pub context: Context,
    pub files: Vec<WrittenFile>,
    /// Source paths whose destination rendered to nothing.
    pub skipped: Vec<String>,
}

/// A file or directory of the template, with its path relative to the
/// template's source root.
#[derive(Debug)]
struct TemplateEntry {
    source: PathBuf,
    relative: String,
    is_dir: bool,
}

/// Returns true if the file's content should be rendered rather than copied.
pub fn is_text_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Creates the output directory if needed; an existing one is reused as is.
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    if !fs::is_dir(output_dir) {
        debug!("Creating output directory: {}", output_dir.display());
    }
    fs::create_dir_all(output_dir)
}

/// Writes rendered template files into an output directory.
///
/// Files are processed strictly in order: declared order for explicit file
/// lists, sorted walk order for legacy templates. The first fatal error stops
/// the run; files already written stay on disk.
pub struct Applier<'a> {
    registry: TemplateRegistry,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Applier<'a> {
    pub fn new(registry: TemplateRegistry, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { registry, renderer }
    }

    /// Validates template `name` and writes it into `output_dir`.
    ///
    /// # Errors
    /// * Any load or validation error; nothing is written in that case
    /// * `Error::InvalidRenderedPath` if a destination would leave `output_dir`
    /// * `Error::FilesystemError` on a failed directory creation or file write
    pub fn apply<P: AsRef<Path>>(
        &self,
        name: &str,
        output_dir: P,
        context: &Context,
    ) -> Result<ApplyReport> {
        let manifest = TemplateValidator::new(self.registry.clone()).validate(name)?;
        self.apply_validated(name, &manifest, output_dir, context)
    }

    /// Writes an already validated template into `output_dir`.
    pub fn apply_validated<P: AsRef<Path>>(
        &self,
        name: &str,
        manifest: &Manifest,
        output_dir: P,
        context: &Context,
    ) -> Result<ApplyReport> {
        let output_dir = output_dir.as_ref();
        ensure_output_dir(output_dir)?;

        let template_dir = self.registry.template_dir(name);
        let entries = match &manifest.files {
            FileSpec::Explicit(paths) => paths
                .iter()
                .map(|rel| TemplateEntry {
                    source: template_dir.join(rel),
                    relative: rel.clone(),
                    is_dir: false,
                })
                .collect(),
            FileSpec::Legacy => legacy_entries(&template_dir.join(LEGACY_FILES_DIR))?,
        };

        let mut report = ApplyReport {
            output_dir: output_dir.to_path_buf(),
            context: context.clone(),
            ..Default::default()
        };
        for entry in entries {
            self.process_entry(&entry, output_dir, context, &mut report)?;
        }
        Ok(report)
    }

    fn process_entry(
        &self,
        entry: &TemplateEntry,
        output_dir: &Path,
        context: &Context,
        report: &mut ApplyReport,
    ) -> Result<()> {
        debug!("Processing source file: {}", entry.relative);
        let rendered = self.renderer.render(&entry.relative, context, RenderPolicy::Lenient)?;

        // A conditional segment that rendered to nothing drops the entry.
        if rendered.trim().is_empty() || rendered.split(['/', '\\']).any(|s| s.trim().is_empty())
        {
            debug!("Skipping '{}': rendered path '{}' is empty", entry.relative, rendered);
            report.skipped.push(entry.relative.clone());
            return Ok(());
        }
        if !is_safe_relative_path(&rendered) {
            return Err(Error::InvalidRenderedPath {
                source_path: entry.relative.clone(),
                rendered,
            });
        }

        let target = output_dir.join(&rendered);
        if entry.is_dir {
            return fs::create_dir_all(&target);
        }

        let action = self.copy_and_render(&entry.source, &target, context)?;
        debug!("{action}: '{}'", target.display());
        report.files.push(WrittenFile { source: entry.source.clone(), target, action });
        Ok(())
    }

    fn copy_and_render(&self, source: &Path, target: &Path, context: &Context) -> Result<FileAction> {
        if !is_text_file(source) {
            fs::copy_file(source, target)?;
            return Ok(FileAction::Copied);
        }

        let content = match fs::read_file(source) {
            Ok(content) => content,
            Err(Error::FilesystemError { source: err, .. })
                if err.kind() == io::ErrorKind::InvalidData =>
            {
                warn!("'{}' is not valid UTF-8, copying it unrendered", source.display());
                fs::copy_file(source, target)?;
                return Ok(FileAction::Copied);
            }
            Err(err) => return Err(err),
        };

        let rendered = self.renderer.render(&content, context, RenderPolicy::Lenient)?;
        fs::write_file(target, &rendered)?;
        Ok(FileAction::Rendered)
    }
}

/// Collects every entry under a legacy `files/` directory, sorted by name at
/// each level so the order is the same on every platform.
fn legacy_entries(root: &Path) -> Result<Vec<TemplateEntry>> {
    let mut entries = Vec::new();
    for dir_entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let dir_entry = dir_entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::FilesystemError { path, source: e.into() }
        })?;
        let relative = dir_entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_str())
                    .collect::<Option<Vec<_>>>()
            })
            .map(|segments| segments.join("/"))
            .ok_or_else(|| Error::FilesystemError {
                path: dir_entry.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
            })?;

        entries.push(TemplateEntry {
            source: dir_entry.path().to_path_buf(),
            relative,
            is_dir: dir_entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

//! Error handling for create-sparc.
//! Defines the error taxonomy shared by the registry, loader, validator,
//! renderer and applier, and the result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for template resolution and project generation.
///
/// Every variant carries the detail a caller needs to print a useful one-line
/// diagnostic: the offending template, file path or variable names.
#[derive(Error, Debug)]
pub enum Error {
    /// The named template has no directory under the templates root.
    #[error("Template not found: '{name}'.")]
    TemplateNotFound { name: String },

    /// The template directory exists but holds no manifest file.
    #[error("Template manifest not found: '{}'.", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The manifest exists but is not a valid structured document.
    #[error("Invalid template manifest '{}': {message}.", path.display())]
    ManifestParseError { path: PathBuf, message: String },

    /// The manifest parsed but the template failed structural validation.
    #[error("Template '{name}' is invalid: {reason}.")]
    TemplateInvalid { name: String, reason: String },

    /// One or more required variables are missing or empty.
    #[error("Missing required template variables: {}.", names.join(", "))]
    MissingRequiredVariables { names: Vec<String> },

    /// A strict-mode render referenced a variable absent from the context.
    #[error("Undefined template variable: '{name}'.")]
    UndefinedVariable { name: String },

    /// The template engine rejected a template outright.
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),

    /// A filesystem operation failed on a specific path.
    #[error("Filesystem error at '{}': {source}.", path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination path rendered to something that would escape the output directory.
    #[error("Rendered path '{rendered}' for '{source_path}' is not a safe relative path.")]
    InvalidRenderedPath { source_path: String, rendered: String },

    /// The templates root holds no usable template.
    #[error("No templates available in '{}'.", templates_dir.display())]
    NoTemplates { templates_dir: PathBuf },

    /// Represents errors that occur during hook script execution.
    #[error("Hook execution error: {0}.")]
    HookError(String),

    /// Represents errors while loading the user settings.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur during file system operations without a known path.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Builds a `FilesystemError` for `path`; meant for `map_err`.
    pub fn fs<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::FilesystemError { path, source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// The message is a single line; the error's source chain is only logged at
/// debug level so that `--verbose` runs can show the underlying cause.
pub fn default_error_handler(err: Error) -> ! {
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        log::debug!("caused by: {cause}");
        source = cause.source();
    }
    eprintln!("{err}");
    std::process::exit(1);
}

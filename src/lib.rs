//! create-sparc is a template-driven project scaffolding tool.
//! It discovers templates under a templates root, validates their manifests,
//! builds a variable context and renders file names and contents into a new
//! project directory.

/// Template application: walks a template's files and writes the rendered project
pub mod applier;

/// Command-line interface module for the create-sparc application
pub mod cli;

/// User settings (templates root, default template)
pub mod config;

/// Common constants: manifest names, text extensions, defaults
pub mod constants;

/// Variable binding context and its builder
pub mod context;

/// Error types and handling for the create-sparc application
pub mod error;

/// Thin filesystem adapter with path-carrying errors
pub mod fs;

/// Project generation orchestration: default template, availability, hooks
pub mod generator;

/// Post-generation hook processing
/// Handles execution of `hooks/post_gen_project`
pub mod hooks;

/// Logger initialisation for the binary
pub mod logger;

/// Consumer-facing template API
pub mod manager;

/// Template manifest model and loader
/// Supports JSON and YAML formats (template.json, template.yml, template.yaml)
pub mod manifest;

/// Template discovery under a templates root
pub mod registry;

/// Template string rendering with strict and lenient undefined handling
pub mod renderer;

/// Template structural validation
pub mod validator;

pub use applier::{Applier, ApplyReport, FileAction};
pub use context::{Context, ContextBuilder};
pub use error::{Error, Result};
pub use manager::TemplateManager;
pub use manifest::{FileSpec, Manifest};
pub use renderer::{MiniJinjaRenderer, RenderPolicy, TemplateRenderer};

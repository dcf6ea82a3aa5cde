//! Variable binding context for rendering.
//!
//! A context is built in layers, later layers winning:
//! 1. manifest defaults (`variables`)
//! 2. built-in project facts (`project_name`, `project_description`,
//!    `template_name`, `template_version`), which defaults never override
//! 3. caller-supplied variables, which override everything

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Names of the built-in variables.
pub const BUILTIN_VARIABLES: [&str; 4] =
    ["project_name", "project_description", "template_name", "template_version"];

/// Resolved mapping from variable name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: IndexMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if `name` is missing or the empty string.
    fn is_unresolved(&self, name: &str) -> bool {
        match self.values.get(name) {
            None => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        for (k, v) in iter {
            context.insert(k, v);
        }
        context
    }
}

/// Builds a binding [`Context`] for one generation run.
pub struct ContextBuilder;

impl ContextBuilder {
    /// Merges built-ins, manifest defaults and caller variables, then checks
    /// that every required variable resolved to a non-empty value.
    ///
    /// # Errors
    /// * `Error::MissingRequiredVariables` naming every unresolved variable,
    ///   in `required_variables` order
    pub fn build(
        project_name: &str,
        manifest: &Manifest,
        caller_vars: &IndexMap<String, Value>,
    ) -> Result<Context> {
        let builtins = [
            ("project_name", project_name.to_string()),
            ("project_description", manifest.description.clone().unwrap_or_default()),
            ("template_name", manifest.name.clone().unwrap_or_default()),
            ("template_version", manifest.version.clone().unwrap_or_default()),
        ];

        let mut context = Context::new();
        for (name, value) in builtins {
            context.insert(name, value);
        }
        for (name, value) in &manifest.variables {
            if !BUILTIN_VARIABLES.contains(&name.as_str()) {
                context.insert(name.clone(), value.clone());
            }
        }
        for (name, value) in caller_vars {
            context.insert(name.clone(), value.clone());
        }

        let missing: Vec<String> = manifest
            .required_variables
            .iter()
            .filter(|name| context.is_unresolved(name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingRequiredVariables { names: missing });
        }

        Ok(context)
    }
}

//! Template rendering for file names and file contents.
//! Wraps MiniJinja with the two undefined-variable policies used by the
//! applier and a fallback that leaves malformed templates untouched.

use crate::context::Context;
use crate::error::{Error, Result};
use cruet::Inflector;
use log::{debug, warn};
use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Name under which the string being rendered is registered.
const TEMPLATE_NAME: &str = "__inline__";

/// Names resolved by the engine itself; never shadowed with the undefined sentinel.
const ENGINE_NAMES: [&str; 10] =
    ["range", "dict", "debug", "namespace", "loop", "self", "super", "caller", "varargs", "kwargs"];

/// How a render treats variables referenced by the template but absent from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Referencing an absent variable is an [`Error::UndefinedVariable`].
    Strict,
    /// Absent variables are bound to the engine's undefined value, so `if`
    /// tests are false, `default` filters apply and printing yields nothing.
    /// Dotted or indexed access on an absent variable is undefined as well.
    #[default]
    Lenient,
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// Malformed templates are not an error: the input is returned unchanged
    /// and a warning is logged.
    ///
    /// # Errors
    /// * `Error::UndefinedVariable` under [`RenderPolicy::Strict`] only
    fn render(&self, template: &str, context: &Context, policy: RenderPolicy) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with case-conversion filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        register_filters(&mut env);
        Self { env }
    }

    /// Top-level variables the template reads without declaring them itself.
    ///
    /// Loop variables and `set` targets are excluded, so are names the engine
    /// resolves on its own such as `range` or `loop`.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the template does not parse
    pub fn free_variables(&self, template: &str) -> Result<BTreeSet<String>> {
        let mut env = self.env.clone();
        env.add_template_owned(TEMPLATE_NAME, template.to_string())?;
        let tmpl = env.get_template(TEMPLATE_NAME)?;
        Ok(scan(&tmpl))
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &Context, policy: RenderPolicy) -> Result<String> {
        let mut env = self.env.clone();
        env.set_undefined_behavior(match policy {
            RenderPolicy::Strict => UndefinedBehavior::Strict,
            // Attribute and index lookups on undefined stay undefined instead of failing.
            RenderPolicy::Lenient => UndefinedBehavior::Chainable,
        });

        let parsed = env
            .add_template_owned(TEMPLATE_NAME, template.to_string())
            .and_then(|_| env.get_template(TEMPLATE_NAME));
        let tmpl = match parsed {
            Ok(tmpl) => tmpl,
            Err(err) => {
                warn!("Template syntax error, keeping content unrendered: {err}");
                return Ok(template.to_string());
            }
        };

        let free = scan(&tmpl);
        let mut values: BTreeMap<String, Value> =
            context.iter().map(|(k, v)| (k.clone(), Value::from_serialize(v))).collect();
        if policy == RenderPolicy::Lenient {
            for name in &free {
                if !values.contains_key(name) {
                    debug!("Binding undeclared variable '{name}' to undefined");
                    values.insert(name.clone(), Value::UNDEFINED);
                }
            }
        }

        match tmpl.render(Value::from(values)) {
            Ok(rendered) => Ok(rendered),
            Err(err) if policy == RenderPolicy::Strict && err.kind() == ErrorKind::UndefinedError => {
                let name = free
                    .iter()
                    .find(|name| !context.contains(name))
                    .cloned()
                    .unwrap_or_else(|| err.detail().unwrap_or("<unknown>").to_string());
                Err(Error::UndefinedVariable { name })
            }
            Err(err) => {
                warn!("Template render error, keeping content unrendered: {err}");
                Ok(template.to_string())
            }
        }
    }
}

fn scan(tmpl: &minijinja::Template<'_, '_>) -> BTreeSet<String> {
    tmpl.undeclared_variables(false)
        .into_iter()
        .filter(|name| !ENGINE_NAMES.contains(&name.as_str()))
        .collect()
}

/// Registers the extra filters available to every template.
fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("snake_case", |value: String| value.to_snake_case());
    env.add_filter("kebab_case", |value: String| value.to_kebab_case());
    env.add_filter("camel_case", |value: String| value.to_camel_case());
    env.add_filter("pascal_case", |value: String| value.to_pascal_case());
    env.add_filter("title_case", |value: String| value.to_title_case());
    env.add_filter("screaming_snake_case", |value: String| value.to_screaming_snake_case());
}

//! Post-generation hook discovery and execution.
//!
//! A template may ship an executable `hooks/post_gen_project`. It runs inside
//! the generated project and receives a JSON [`Output`] document on stdin.

use crate::constants::{HOOKS_DIR, POST_GEN_HOOK};
use crate::context::Context;
use crate::error::{Error, Result};
use log::debug;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Document written to the hook's stdin.
#[derive(Serialize)]
pub struct Output<'a> {
    pub template_dir: &'a str,
    pub output_dir: &'a str,
    pub context: &'a Context,
}

/// Returns the post-generation hook path of the template in `template_dir`.
pub fn get_post_hook<P: AsRef<Path>>(template_dir: P) -> PathBuf {
    template_dir.as_ref().join(HOOKS_DIR).join(POST_GEN_HOOK)
}

/// Runs `script_path` with `output_dir` as working directory.
///
/// # Errors
/// * `Error::HookError` if the script cannot be started or exits non-zero
pub fn run_hook(
    template_dir: &Path,
    output_dir: &Path,
    script_path: &Path,
    context: &Context,
) -> Result<()> {
    debug!("Running hook {}", script_path.display());

    let template_dir_str = template_dir.display().to_string();
    let output_dir_str = output_dir.display().to_string();
    let output =
        Output { template_dir: &template_dir_str, output_dir: &output_dir_str, context };
    let payload = serde_json::to_vec(&output)
        .map_err(|e| Error::HookError(format!("failed to serialize hook input: {e}")))?;

    // A relative program path would be resolved against the new working directory.
    let program = script_path.canonicalize().map_err(Error::fs(script_path))?;
    let mut child = Command::new(&program)
        .current_dir(output_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::HookError(format!("failed to start '{}': {e}", script_path.display())))?;

    if let Some(mut stdin) = child.stdin.take() {
        // Hooks that ignore their input close the pipe early.
        match stdin.write_all(&payload) {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                return Err(Error::fs(script_path)(e));
            }
            _ => {}
        }
    }

    let status = child.wait().map_err(Error::fs(script_path))?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "'{}' failed with status: {status}",
            script_path.display()
        )));
    }

    Ok(())
}

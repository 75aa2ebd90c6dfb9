//! Artifact naming
//!
//! Records are named `{spec}_{test titles joined by " > "}_{retry + 1}.json`
//! unless a configured hook supplies a name.

use std::path::{Component, Path, PathBuf};
use shared::RunContext;

pub const ARTIFACT_EXTENSION: &str = "json";

pub fn default_artifact_name(meta: &RunContext) -> String {
    format!("{}_{}_{}", meta.spec, meta.test_title(), meta.retry_attempt + 1)
}

/// Render a `--filename-template` style pattern
///
/// Supported placeholders: `{spec}`, `{test}`, `{retry}` (one-based attempt).
/// Returns `None` when the rendered name is blank.
pub fn render_template(template: &str, meta: &RunContext) -> Option<String> {
    let name = template
        .replace("{spec}", &meta.spec)
        .replace("{test}", &meta.test_title())
        .replace("{retry}", &(meta.retry_attempt + 1).to_string());
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Relative path of the artifact file for a name
///
/// Only plain components survive, so a name can add subdirectories under
/// the output directory but never climb out of it.
pub fn artifact_relative_path(name: &str) -> PathBuf {
    let file_name = format!("{name}.{ARTIFACT_EXTENSION}");
    Path::new(&file_name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

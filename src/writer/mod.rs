use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::notify::Notifier;
use crate::options::ProjectOptions;
use crate::template::{render, Template};

/// A template rendered against a set of options, not yet on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Relative to the project root
    pub path: PathBuf,
    pub body: String,
}

/// What to do when a target file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    #[default]
    Overwrite,
    Refuse,
}

/// A rendered path that would land outside the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsafePath(pub String);

impl std::fmt::Display for UnsafePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Path '{}' escapes the project directory", self.0)
    }
}

impl std::error::Error for UnsafePath {}

/// Render every template's path and body. Nothing touches the disk, so any
/// error here leaves the target directory as it was.
pub fn plan(options: &ProjectOptions, catalog: &[Template]) -> Result<Vec<RenderedFile>> {
    let context = options.context();

    catalog
        .iter()
        .map(|template| -> Result<RenderedFile> {
            let path = render(template.path, &context)
                .context(format!("Failed to render path '{}'", template.path))?;
            let path = contained_path(&path)?;
            let body = render(template.body, &context)
                .context(format!("Failed to render {}", path.display()))?;
            Ok(RenderedFile { path, body })
        })
        .collect()
}

/// Only plain relative components are allowed
fn contained_path(rendered: &str) -> Result<PathBuf> {
    let path = Path::new(rendered);
    let mut clean = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(UnsafePath(rendered.to_string()).into());
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(UnsafePath(rendered.to_string()).into());
    }
    Ok(clean)
}

/// Write planned files under `root` in order. The root and the module package
/// directory are created first. Stops at the first I/O error; files written
/// before it stay on disk.
pub fn write_project(
    root: &Path,
    module: &str,
    files: &[RenderedFile],
    policy: OverwritePolicy,
    notifier: &mut impl Notifier,
) -> Result<Vec<PathBuf>> {
    if policy == OverwritePolicy::Refuse {
        let existing: Vec<String> = files
            .iter()
            .map(|f| root.join(&f.path))
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .collect();
        if !existing.is_empty() {
            anyhow::bail!(
                "Refusing to overwrite existing files: {}",
                existing.join(", ")
            );
        }
    }

    let package_dir = root.join(contained_path(module)?);
    fs::create_dir_all(&package_dir)
        .context(format!("Failed to create directory {}", package_dir.display()))?;

    let total = files.len();
    let mut written = Vec::with_capacity(total);
    for (index, file) in files.iter().enumerate() {
        let target = root.join(&file.path);
        notifier.progress(format!(
            "Writing file {} of {}: {}",
            index + 1,
            total,
            file.path.display()
        ));

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&target, &file.body)
            .context(format!("Failed to write {}", target.display()))?;

        written.push(target);
    }

    Ok(written)
}

mod prompt;
mod schema;
mod validation;

pub use prompt::prompt_options;
pub use schema::FIELDS;
pub use validation::{InvalidOptions, ValidationResult};

use anyhow::{Context, Result};
use heck::ToSnakeCase;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::template::RenderContext;

/// Everything needed to scaffold a new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub source: PathBuf,
    pub name: String,
    pub author: String,
    pub module: String,
    pub domain: String,
    pub application_url: String,
    pub help_url: String,
    pub installer: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            name: "My Application".to_string(),
            author: "My Company".to_string(),
            module: "myapplication".to_string(),
            domain: "mydomain.com".to_string(),
            application_url: "http://www.python-camelot.com".to_string(),
            help_url: "http://www.python-camelot.com/docs.html".to_string(),
            installer: false,
        }
    }
}

impl ProjectOptions {
    /// The value of a named field as it is substituted into templates
    pub fn value(&self, field: &str) -> Option<String> {
        let value = match field {
            "source" => self.source.to_string_lossy().to_string(),
            "name" => self.name.clone(),
            "author" => self.author.clone(),
            "module" => self.module.clone(),
            "domain" => self.domain.clone(),
            "application_url" => self.application_url.clone(),
            "help_url" => self.help_url.clone(),
            "installer" => String::from(if self.installer { "True" } else { "False" }),
            _ => return None,
        };
        Some(value)
    }

    /// Set a named field from its textual form
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "source" => self.source = PathBuf::from(value),
            "name" => self.name = value.to_string(),
            "author" => self.author = value.to_string(),
            "module" => self.module = value.to_string(),
            "domain" => self.domain = value.to_string(),
            "application_url" => self.application_url = value.to_string(),
            "help_url" => self.help_url = value.to_string(),
            "installer" => self.installer = parse_bool(value)?,
            _ => anyhow::bail!("Unknown option '{}'", field),
        }
        Ok(())
    }

    /// Key/value record handed to the template renderer
    pub fn context(&self) -> RenderContext {
        FIELDS
            .iter()
            .filter_map(|spec| self.value(spec.name).map(|v| (spec.name, v)))
            .collect()
    }

    pub fn validate(&self) -> ValidationResult {
        validation::validate_options(self)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "0" | "off" => Ok(false),
        other => anyhow::bail!("Expected yes or no, got '{}'", other),
    }
}

/// A partial set of options, one configuration layer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsOverlay {
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub help_url: Option<String>,
    #[serde(default)]
    pub installer: Option<bool>,
}

impl OptionsOverlay {
    pub fn apply(&self, options: &mut ProjectOptions) {
        if let Some(source) = &self.source {
            options.source = source.clone();
        }
        if let Some(name) = &self.name {
            options.name = name.clone();
        }
        if let Some(author) = &self.author {
            options.author = author.clone();
        }
        if let Some(module) = &self.module {
            options.module = module.clone();
        }
        if let Some(domain) = &self.domain {
            options.domain = domain.clone();
        }
        if let Some(application_url) = &self.application_url {
            options.application_url = application_url.clone();
        }
        if let Some(help_url) = &self.help_url {
            options.help_url = help_url.clone();
        }
        if let Some(installer) = self.installer {
            options.installer = installer;
        }
    }
}

/// Load an options layer from a YAML file
pub fn load_overlay(path: impl AsRef<Path>) -> Result<OptionsOverlay> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .context(format!("Failed to read options file: {}", path.display()))?;

    serde_yaml::from_str(&contents)
        .context(format!("Failed to parse options file: {}", path.display()))
}

/// Per-user defaults, e.g. ~/.config/stencil/defaults.yaml
pub fn user_defaults_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stencil").join("defaults.yaml"))
}

/// Load the per-user defaults layer, if the file exists
pub fn load_user_defaults() -> Result<Option<OptionsOverlay>> {
    match user_defaults_path() {
        Some(path) if path.exists() => load_overlay(&path).map(Some),
        _ => Ok(None),
    }
}

/// Apply layers over the built-in defaults, later layers winning.
/// A module is derived from the name when no layer sets one.
pub fn resolve(layers: &[OptionsOverlay]) -> ProjectOptions {
    let mut options = ProjectOptions::default();
    for layer in layers {
        layer.apply(&mut options);
    }

    let name_given = layers.iter().any(|l| l.name.is_some());
    let module_given = layers.iter().any(|l| l.module.is_some());
    if name_given && !module_given {
        options.module = options.name.to_snake_case();
    }

    options
}

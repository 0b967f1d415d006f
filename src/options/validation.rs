use crate::options::schema::{FieldKind, FIELDS};
use crate::options::ProjectOptions;

/// Outcome of checking project options. Errors stop project creation,
/// warnings are shown and the project is still written.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

/// Why a set of project options cannot be used to create a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    InvalidModule { module: String },
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate project options before anything is written
pub fn validate_options(options: &ProjectOptions) -> ValidationResult {
    let mut result = ValidationResult::new();

    for spec in FIELDS.iter().filter(|f| f.required && f.kind != FieldKind::Bool) {
        let empty = options
            .value(spec.name)
            .map(|v| v.trim().is_empty())
            .unwrap_or(true);
        if empty {
            result.add_error(ValidationError::EmptyField { field: spec.name });
        }
    }

    // The module doubles as a directory name, so this also keeps it inside the root
    if !options.module.trim().is_empty() && !is_python_identifier(&options.module) {
        result.add_error(ValidationError::InvalidModule {
            module: options.module.clone(),
        });
    }

    for (field, url) in [
        ("application_url", &options.application_url),
        ("help_url", &options.help_url),
    ] {
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            result.add_warning(format!("{} '{}' is not an http(s) URL", field, url));
        }
    }

    // Text values land inside single-quoted python literals
    for field in QUOTED_FIELDS {
        let value = options.value(field).unwrap_or_default();
        if value.contains('\'') || value.contains('\\') {
            result.add_warning(format!(
                "{} '{}' contains a quote or backslash, the generated python will need editing",
                field, value
            ));
        }
    }

    result
}

/// Fields substituted into `'...'` literals in the generated sources
const QUOTED_FIELDS: &[&str] = &["name", "author", "domain", "application_url", "help_url"];

pub fn is_python_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Option '{}' cannot be empty", field)
            }
            ValidationError::InvalidModule { module } => {
                write!(
                    f,
                    "Module '{}' is not a valid python module name (letters, digits and '_', not starting with a digit)",
                    module
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Returned by the workflow when options fail validation
#[derive(Debug, Clone)]
pub struct InvalidOptions(pub Vec<ValidationError>);

impl std::fmt::Display for InvalidOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "Invalid project options: {}", messages.join("; "))
    }
}

impl std::error::Error for InvalidOptions {}

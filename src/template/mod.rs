mod catalog;

pub use catalog::{Template, CATALOG};

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name to substituted value
pub type RenderContext = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    UnknownPlaceholder { name: String },
    /// A `{{` with no closing `}}`, or with something other than a field name inside
    Malformed { offset: usize },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::UnknownPlaceholder { name } => {
                write!(f, "Template refers to unknown option '{}'", name)
            }
            RenderError::Malformed { offset } => {
                write!(f, "Malformed placeholder at byte {}", offset)
            }
        }
    }
}

impl std::error::Error for RenderError {}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Substitute every `{{ field }}` in `template` with its value from `context`
pub fn render(template: &str, context: &RenderContext) -> Result<String, RenderError> {
    let pattern = placeholder_pattern();
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in pattern.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        check_literal(template, last, whole.start())?;

        let name = &caps[1];
        let value = context
            .get(name)
            .ok_or_else(|| RenderError::UnknownPlaceholder {
                name: name.to_string(),
            })?;

        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(value);
        last = whole.end();
    }

    check_literal(template, last, template.len())?;
    rendered.push_str(&template[last..]);
    Ok(rendered)
}

/// Literal text between placeholders must not open another one
fn check_literal(template: &str, start: usize, end: usize) -> Result<(), RenderError> {
    match template[start..end].find("{{") {
        Some(pos) => Err(RenderError::Malformed { offset: start + pos }),
        None => Ok(()),
    }
}

/// Names of all placeholders a template refers to, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    placeholder_pattern()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ProjectOptions, FIELDS};

    fn context() -> RenderContext {
        let mut context = RenderContext::new();
        context.insert("name", "Acme".to_string());
        context.insert("module", "acme".to_string());
        context
    }

    #[test]
    fn test_render_substitutes() {
        let rendered = render("name = '{{name}}' in {{ module }}/", &context()).unwrap();
        assert_eq!(rendered, "name = 'Acme' in acme/");
    }

    #[test]
    fn test_render_without_placeholders() {
        assert_eq!(render("", &context()).unwrap(), "");
        assert_eq!(
            render("{'gui_scripts': []}", &context()).unwrap(),
            "{'gui_scripts': []}"
        );
    }

    #[test]
    fn test_unknown_placeholder_is_an_error() {
        let err = render("{{author}}", &context()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownPlaceholder {
                name: "author".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_placeholder_is_an_error() {
        assert_eq!(
            render("abc {{name", &context()).unwrap_err(),
            RenderError::Malformed { offset: 4 }
        );
        assert_eq!(
            render("{{name}} {{ not a name }}", &context()).unwrap_err(),
            RenderError::Malformed { offset: 9 }
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            placeholders("{{module}}/{{ name }}/x"),
            vec!["module", "name"]
        );
    }

    #[test]
    fn test_catalog_only_refers_to_known_fields() {
        let known: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        for template in CATALOG {
            for name in placeholders(template.path)
                .into_iter()
                .chain(placeholders(template.body))
            {
                assert!(known.contains(&name), "{} uses {}", template.path, name);
            }
        }
    }

    #[test]
    fn test_catalog_renders_deterministically() {
        let context = ProjectOptions::default().context();
        for template in CATALOG {
            let first = render(template.body, &context).unwrap();
            let second = render(template.body, &context).unwrap();
            assert_eq!(first.as_bytes(), second.as_bytes());
        }
    }
}

/// How a field should be presented and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Directory,
    Text,
    Bool,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Directory => "directory",
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
        }
    }
}

/// Presentation metadata for one project option
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub help: &'static str,
    pub required: bool,
}

/// All project options, in the order they are presented
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "source",
        label: "Source",
        kind: FieldKind::Directory,
        help: "The directory in which to create the sources of the new project",
        required: true,
    },
    FieldSpec {
        name: "name",
        label: "Name",
        kind: FieldKind::Text,
        help: "The name of the application as it will appear in the main window \
               and will be used to store settings in the registry",
        required: true,
    },
    FieldSpec {
        name: "author",
        label: "Author",
        kind: FieldKind::Text,
        help: "The author of the application, this will be used to store settings \
               in the registry",
        required: true,
    },
    FieldSpec {
        name: "module",
        label: "Module",
        kind: FieldKind::Text,
        help: "The name of the python module that will contain the application",
        required: true,
    },
    FieldSpec {
        name: "domain",
        label: "Domain",
        kind: FieldKind::Text,
        help: "The domain name of the author, this will be used to store settings \
               in the registry",
        required: true,
    },
    FieldSpec {
        name: "application_url",
        label: "Application URL",
        kind: FieldKind::Text,
        help: "Website of the application",
        required: true,
    },
    FieldSpec {
        name: "help_url",
        label: "Help URL",
        kind: FieldKind::Text,
        help: "Part of the website with online help",
        required: true,
    },
    FieldSpec {
        name: "installer",
        label: "Installer",
        kind: FieldKind::Bool,
        help: "Build a windows installer",
        required: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FIELDS.len());
    }

    #[test]
    fn test_only_source_is_a_directory() {
        let directories: Vec<&str> = FIELDS
            .iter()
            .filter(|f| f.kind == FieldKind::Directory)
            .map(|f| f.name)
            .collect();
        assert_eq!(directories, vec!["source"]);
    }
}

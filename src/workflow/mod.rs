use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::notify::{Notification, Notifier};
use crate::options::{InvalidOptions, ProjectOptions};
use crate::package::{package_project, PackagingOutcome, PackagingSettings};
use crate::template::{Template, CATALOG};
use crate::writer::{plan, write_project, OverwritePolicy};

/// Where a project creation run ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CollectingOptions,
    Writing,
    Packaging,
    Done,
    /// Writing stopped on an I/O error
    Failed,
    /// Files are written, the installer is not
    PackagingFailed,
}

/// Settings for a single run, created by the caller and dropped when it returns
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub overwrite: OverwritePolicy,
    pub packaging: PackagingSettings,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub stage: Stage,
    pub project_path: PathBuf,
    pub files: Vec<PathBuf>,
    pub packaging: PackagingOutcome,
}

/// Create a new project: validate, write every catalog file, then build the
/// installer when asked to.
pub fn run(
    options: &ProjectOptions,
    settings: &Settings,
    notifier: &mut impl Notifier,
) -> Result<Outcome> {
    run_catalog(options, CATALOG, settings, notifier)
}

fn run_catalog(
    options: &ProjectOptions,
    catalog: &[Template],
    settings: &Settings,
    notifier: &mut impl Notifier,
) -> Result<Outcome> {
    let mut stage = Stage::CollectingOptions;

    let validation = options.validate();
    for warning in &validation.warnings {
        notifier.info(warning.clone());
    }
    if !validation.is_valid {
        for error in &validation.errors {
            notifier.notify(Notification::Error(error.to_string()));
        }
        return Err(InvalidOptions(validation.errors).into());
    }

    advance(&mut stage, Stage::Writing, notifier);
    notifier.progress("Creating new project");

    // Every error past validation is reported here, once
    let (written, project_path) = match write_files(options, catalog, settings, notifier) {
        Ok(done) => done,
        Err(e) => {
            advance(&mut stage, Stage::Failed, notifier);
            notifier.notify(Notification::Error(format!("{:#}", e)));
            return Err(e);
        }
    };

    let packaging = if options.installer {
        advance(&mut stage, Stage::Packaging, notifier);
        package_project(&project_path, &settings.packaging, notifier)
    } else {
        PackagingOutcome::Skipped
    };

    if let PackagingOutcome::Failed { .. } = packaging {
        advance(&mut stage, Stage::PackagingFailed, notifier);
    } else {
        advance(&mut stage, Stage::Done, notifier);
    }

    notifier.notify(Notification::Success(format!(
        "All files for the new project were created in {}",
        project_path.display()
    )));

    Ok(Outcome {
        stage,
        project_path,
        files: written,
        packaging,
    })
}

/// Plan, write, and resolve the absolute project path
fn write_files(
    options: &ProjectOptions,
    catalog: &[Template],
    settings: &Settings,
    notifier: &mut impl Notifier,
) -> Result<(Vec<PathBuf>, PathBuf)> {
    let files = plan(options, catalog)?;
    let written = write_project(
        &options.source,
        &options.module,
        &files,
        settings.overwrite,
        notifier,
    )?;
    let project_path = absolute(&options.source)?;
    Ok((written, project_path))
}

fn advance(stage: &mut Stage, next: Stage, notifier: &mut impl Notifier) {
    notifier.progress(format!("{:?} -> {:?}", stage, next));
    *stage = next;
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .context(format!("Failed to resolve {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use std::fs;
    use tempfile::tempdir;

    fn options_in(root: &Path) -> ProjectOptions {
        ProjectOptions {
            source: root.to_path_buf(),
            name: "Acme".to_string(),
            module: "myapp".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_creates_project() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");
        let mut notifier = RecordingNotifier::default();

        let outcome = run(&options_in(&root), &Settings::default(), &mut notifier).unwrap();

        assert_eq!(outcome.stage, Stage::Done);
        assert_eq!(outcome.packaging, PackagingOutcome::Skipped);
        assert_eq!(outcome.files.len(), CATALOG.len());
        assert_eq!(outcome.project_path, root.canonicalize().unwrap());
        assert_eq!(
            fs::read_to_string(root.join("myapp/__init__.py")).unwrap(),
            ""
        );
        let admin = fs::read_to_string(root.join("myapp/application_admin.py")).unwrap();
        assert!(admin.contains("name = 'Acme'"));
        assert!(matches!(
            notifier.received.last(),
            Some(Notification::Success(text)) if text.contains("All files")
        ));
    }

    #[test]
    fn test_empty_module_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");
        let options = ProjectOptions {
            module: String::new(),
            ..options_in(&root)
        };
        let mut notifier = RecordingNotifier::default();

        let err = run(&options, &Settings::default(), &mut notifier).unwrap_err();

        assert!(err.downcast_ref::<InvalidOptions>().is_some());
        assert!(!root.exists());
        assert_eq!(notifier.errors().len(), 1);
        assert!(notifier.errors()[0].contains("module"));
    }

    #[test]
    fn test_missing_packaging_tool_still_completes() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");
        let options = ProjectOptions {
            installer: true,
            ..options_in(&root)
        };
        let settings = Settings {
            packaging: PackagingSettings {
                python: "stencil-test-no-such-python".to_string(),
            },
            ..Default::default()
        };
        let mut notifier = RecordingNotifier::default();

        let outcome = run(&options, &settings, &mut notifier).unwrap();

        assert_eq!(outcome.stage, Stage::Done);
        assert!(matches!(
            outcome.packaging,
            PackagingOutcome::ToolUnavailable { .. }
        ));
        for path in &outcome.files {
            assert!(path.is_file());
        }
        assert_eq!(outcome.files.len(), CATALOG.len());
        assert_eq!(notifier.infos().len(), 1);
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let temp_dir = tempdir().unwrap();
        // The root is a file, so no directory can be created under it
        let root = temp_dir.path().join("acme");
        fs::write(&root, "not a directory").unwrap();
        let mut notifier = RecordingNotifier::default();

        let result = run(&options_in(&root), &Settings::default(), &mut notifier);

        assert!(result.is_err());
        assert!(notifier
            .received
            .contains(&Notification::Progress("Writing -> Failed".to_string())));
        assert_eq!(notifier.errors().len(), 1);
    }

    #[test]
    fn test_render_failure_is_reported_once() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");
        let catalog = [Template {
            path: "{{module}}/{{colour}}.py",
            body: "",
        }];
        let mut notifier = RecordingNotifier::default();

        let result = run_catalog(
            &options_in(&root),
            &catalog,
            &Settings::default(),
            &mut notifier,
        );

        assert!(result.is_err());
        assert!(!root.exists());
        assert_eq!(notifier.errors().len(), 1);
        assert!(notifier.errors()[0].contains("colour"));
        assert!(notifier
            .received
            .contains(&Notification::Progress("Writing -> Failed".to_string())));
    }

    /// Stand-in interpreter: passes the SDK import check, then runs `body`
    #[cfg(unix)]
    fn fake_python(dir: &Path, body: &str) -> String {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-python");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "#!/bin/sh\nif [ \"$2\" = \"import cloudlaunch\" ]; then exit 0; fi\n{}\n",
            body
        )
        .unwrap();
        file.sync_all().unwrap();
        drop(file);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn test_packaging_failure_keeps_project() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");
        let python = fake_python(
            temp_dir.path(),
            "echo \"error: invalid command 'bdist_cloud'\" >&2\nexit 1",
        );
        let options = ProjectOptions {
            installer: true,
            ..options_in(&root)
        };
        let settings = Settings {
            packaging: PackagingSettings { python },
            ..Default::default()
        };
        let mut notifier = RecordingNotifier::default();

        let outcome = run(&options, &settings, &mut notifier).unwrap();

        assert_eq!(outcome.stage, Stage::PackagingFailed);
        match &outcome.packaging {
            PackagingOutcome::Failed { diagnostic } => {
                assert!(diagnostic.contains("invalid command 'bdist_cloud'"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(outcome.files.len(), CATALOG.len());
        for path in &outcome.files {
            assert!(path.is_file());
        }
        assert_eq!(notifier.errors().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_packaging_reports_installer_script() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");
        let python = fake_python(
            temp_dir.path(),
            "echo running egg_info\necho '[[\"bdist_cloud\", \"any\", \"dist/acme.egg\"], [\"wininst_cloud\", null, \"dist/acme.iss\"]]'",
        );
        let options = ProjectOptions {
            installer: true,
            ..options_in(&root)
        };
        let settings = Settings {
            packaging: PackagingSettings { python },
            ..Default::default()
        };
        let mut notifier = RecordingNotifier::default();

        let outcome = run(&options, &settings, &mut notifier).unwrap();

        assert_eq!(outcome.stage, Stage::Done);
        assert_eq!(
            outcome.packaging,
            PackagingOutcome::Built {
                installer_script: Some(outcome.project_path.join("dist/acme.iss")),
            }
        );
        assert!(notifier.received.iter().any(|n| matches!(
            n,
            Notification::Success(text) if text.contains("Inno Setup") && text.contains("acme.iss")
        )));
    }

    #[test]
    fn test_every_path_stays_under_root() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("acme");

        let outcome = run(
            &options_in(&root),
            &Settings::default(),
            &mut RecordingNotifier::default(),
        )
        .unwrap();

        for path in &outcome.files {
            assert!(path.starts_with(&root), "{}", path.display());
        }
    }
}

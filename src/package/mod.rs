use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::notify::{Notification, Notifier};

/// Arguments handed to setup.py to produce the installer script
pub const SETUP_ARGS: &[&str] = &["egg_info", "bdist_cloud", "wininst_cloud"];

/// The distribution command whose output feeds Inno Setup
const INSTALLER_COMMAND: &str = "wininst_cloud";

const SDK_HINT: &str = "To build a Windows installer, you need to be using the Conceptive \
                        Python SDK, see http://www.conceptive.be/python-sdk.html";

#[derive(Debug, Clone)]
pub struct PackagingSettings {
    /// Interpreter used to run setup.py
    pub python: String,
}

impl Default for PackagingSettings {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagingOutcome {
    Skipped,
    ToolUnavailable { reason: String },
    Built { installer_script: Option<PathBuf> },
    Failed { diagnostic: String },
}

/// One entry of a distribution's `dist_files`: (command, python version, filename)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DistFile(pub String, pub Option<String>, pub String);

/// Build the installer for a freshly written project. Never fails: every problem
/// is reported through the notifier and the returned outcome.
pub fn package_project(
    project_path: &Path,
    settings: &PackagingSettings,
    notifier: &mut impl Notifier,
) -> PackagingOutcome {
    let python = match find_tool(settings) {
        Ok(python) => python,
        Err(reason) => {
            notifier.info(SDK_HINT);
            return PackagingOutcome::ToolUnavailable { reason };
        }
    };

    notifier.progress("Building windows installer");

    match run_setup(&python, project_path) {
        Ok(files) => {
            let installer_script =
                installer_script(&files).map(|filename| project_path.join(filename));
            match &installer_script {
                Some(script) => notifier.notify(Notification::Success(format!(
                    "Use Inno Setup to process {} to build the installer executable",
                    script.display()
                ))),
                None => notifier.info(format!(
                    "setup.py did not produce a {} file",
                    INSTALLER_COMMAND
                )),
            }
            PackagingOutcome::Built { installer_script }
        }
        Err(e) => {
            let diagnostic = format!("{:#}", e);
            notifier.notify(Notification::Error(format!(
                "Building the installer failed: {}",
                diagnostic
            )));
            PackagingOutcome::Failed { diagnostic }
        }
    }
}

/// The interpreter must be on PATH and have the packaging SDK importable
fn find_tool(settings: &PackagingSettings) -> std::result::Result<PathBuf, String> {
    let python = which::which(&settings.python)
        .map_err(|e| format!("{} not found: {}", settings.python, e))?;

    let sdk_check = Command::new(&python)
        .args(["-c", "import cloudlaunch"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| format!("Failed to run {}: {}", python.display(), e))?;

    if !sdk_check.success() {
        return Err(format!("cloudlaunch is not importable by {}", python.display()));
    }
    Ok(python)
}

fn build_script() -> String {
    let args = serde_json::to_string(SETUP_ARGS).unwrap_or_else(|_| "[]".to_string());
    format!(
        "import json, sys\n\
         import distutils.core\n\
         distribution = distutils.core.run_setup('setup.py', script_args={args})\n\
         sys.stdout.write('\\n' + json.dumps([list(f) for f in distribution.dist_files]) + '\\n')\n"
    )
}

/// Run setup.py inside the project directory and collect the files it declares
fn run_setup(python: &Path, project_path: &Path) -> Result<Vec<DistFile>> {
    let output = Command::new(python)
        .arg("-c")
        .arg(build_script())
        .current_dir(project_path)
        .stdin(Stdio::null())
        .output()
        .context(format!("Failed to start {}", python.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("setup.py exited with {}: {}", output.status, stderr.trim());
    }

    parse_dist_files(&String::from_utf8_lossy(&output.stdout))
}

/// The declared files are the last non-empty line of output; setup.py may log before it
pub fn parse_dist_files(stdout: &str) -> Result<Vec<DistFile>> {
    let line = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .context("setup.py produced no output")?;

    serde_json::from_str(line).context("Failed to parse distribution file list")
}

pub fn installer_script(files: &[DistFile]) -> Option<&str> {
    files
        .iter()
        .find(|DistFile(command, _, _)| command == INSTALLER_COMMAND)
        .map(|DistFile(_, _, filename)| filename.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use tempfile::tempdir;

    #[test]
    fn test_parse_dist_files() {
        let stdout = "running egg_info\nwriting Acme.egg-info/PKG-INFO\n\n\
                      [[\"bdist_cloud\", \"any\", \"dist/acme.egg\"], [\"wininst_cloud\", null, \"dist/acme.iss\"]]\n";

        let files = parse_dist_files(stdout).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(
            files[1],
            DistFile(
                "wininst_cloud".to_string(),
                None,
                "dist/acme.iss".to_string()
            )
        );
        assert_eq!(installer_script(&files), Some("dist/acme.iss"));
    }

    #[test]
    fn test_parse_dist_files_errors() {
        assert!(parse_dist_files("").is_err());
        assert!(parse_dist_files("error: invalid command 'bdist_cloud'\n").is_err());
    }

    #[test]
    fn test_no_installer_script() {
        let files = vec![DistFile(
            "bdist_cloud".to_string(),
            Some("any".to_string()),
            "dist/acme.egg".to_string(),
        )];
        assert_eq!(installer_script(&files), None);
    }

    #[test]
    fn test_build_script_passes_fixed_arguments() {
        assert!(build_script()
            .contains(r#"script_args=["egg_info","bdist_cloud","wininst_cloud"]"#));
    }

    #[test]
    fn test_missing_tool_is_informational() {
        let temp_dir = tempdir().unwrap();
        let settings = PackagingSettings {
            python: "stencil-test-no-such-python".to_string(),
        };
        let mut notifier = RecordingNotifier::default();

        let outcome = package_project(temp_dir.path(), &settings, &mut notifier);

        assert!(matches!(outcome, PackagingOutcome::ToolUnavailable { .. }));
        assert_eq!(notifier.infos().len(), 1);
        assert!(notifier.infos()[0].contains("Python SDK"));
        assert!(notifier.errors().is_empty());
    }
}

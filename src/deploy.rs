//! Deployment steps run after the site has been written.
//!
//! Steps run strictly in the configured order. A [`RemoteDeploy`] issues
//! two commands through a [`CommandRunner`]: `select` must succeed, while a
//! failing `publish` only produces a warning and leaves the deployment
//! successful.
//!
//! ```text
//! run_steps()
//!     │
//!     ├── CopyResources ──► copy files into the output directory
//!     ├── Remote        ──► `firebase use <project>` (fatal)
//!     │                     `firebase deploy --only hosting` (warning)
//!     └── Noop
//! ```

use crate::{
    config::defaults,
    log,
    steps::{CopyResources, StepError},
    utils::exec::{CommandRunner, ExecError, Invocation},
};
use serde::{Deserialize, Serialize};
use std::{error::Error as _, fmt, fs, path::Path, time::Duration};
use thiserror::Error;

// ============================================================================
// Types
// ============================================================================

/// Runs a hosting CLI: `{command} {select} {project}` then `{command} {publish}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteDeploy {
    #[serde(default = "defaults::deploy::remote::command")]
    pub command: Vec<String>,

    /// Project (deploy target) passed to the select command.
    pub project: String,

    #[serde(default = "defaults::deploy::remote::select")]
    pub select: Vec<String>,

    #[serde(default = "defaults::deploy::remote::publish")]
    pub publish: Vec<String>,
}

/// One `[[deploy.steps]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum DeployStep {
    CopyResources(CopyResources),
    Remote(RemoteDeploy),
    Noop,
}

impl DeployStep {
    pub fn name(&self) -> String {
        match self {
            Self::CopyResources(copy) => format!("copy_resources({})", copy.from.display()),
            Self::Remote(remote) => format!("remote({})", remote.project),
            Self::Noop => "noop".to_owned(),
        }
    }
}

/// Lifecycle of a single step: `Pending → Running → {Succeeded, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("selecting deploy target `{project}` failed")]
    SelectionFailed {
        project: String,
        #[source]
        source: ExecError,
    },

    /// Logged and recorded, never returned from [`run_steps`].
    #[error("publishing `{project}` failed")]
    PublishFailed {
        project: String,
        #[source]
        source: ExecError,
    },

    #[error("copying resources into `{to}` failed")]
    Copy {
        to: String,
        #[source]
        source: StepError,
    },

    #[error("`{command}` timed out after {}", humantime::format_duration(.timeout.to_owned()))]
    Timeout { command: String, timeout: Duration },
}

/// Outcome of a deployment that did not fail.
#[derive(Debug, Default)]
pub struct DeployReport {
    /// Final state of every step, in configured order.
    pub states: Vec<(String, StepState)>,
    /// Non-fatal failures, e.g. a failed publish.
    pub warnings: Vec<DeployError>,
}

impl DeployReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Run every step in order, stopping at the first fatal failure.
///
/// `output` is the written site; remote commands run in `cwd`.
pub fn run_steps(
    steps: &[DeployStep],
    output: &Path,
    cwd: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<DeployReport, DeployError> {
    let mut states: Vec<StepState> = vec![StepState::Pending; steps.len()];
    let mut warnings = Vec::new();
    let total = steps.len();

    for (i, step) in steps.iter().enumerate() {
        states[i] = StepState::Running;
        log!("deploy"; "[{}/{}] {}", i + 1, total, step.name());

        let result = match step {
            DeployStep::CopyResources(copy) => copy_into(copy, output).map(|count| {
                log!("deploy"; "copied {count} files into {}", output.join(&copy.to).display());
            }),
            DeployStep::Remote(remote) => remote_deploy(remote, cwd, runner).map(|warning| {
                if let Some(warning) = warning {
                    log!("warn"; "{}", describe(&warning));
                    warnings.push(warning);
                }
            }),
            DeployStep::Noop => Ok(()),
        };

        states[i] = if result.is_ok() {
            StepState::Succeeded
        } else {
            StepState::Failed
        };
        result?;
    }

    Ok(DeployReport {
        states: steps.iter().map(DeployStep::name).zip(states).collect(),
        warnings,
    })
}

/// Copy `copy` from disk into the output directory.
fn copy_into(copy: &CopyResources, output: &Path) -> Result<usize, DeployError> {
    let to_error = |source| DeployError::Copy {
        to: copy.to.clone(),
        source,
    };
    let plan = copy.plan().map_err(to_error)?;

    for (source, dest) in &plan {
        let target = output.join(dest);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                to_error(StepError::Io {
                    path: parent.to_path_buf(),
                    source: err,
                })
            })?;
        }
        fs::copy(source, &target).map_err(|err| {
            to_error(StepError::Io {
                path: target.clone(),
                source: err,
            })
        })?;
    }
    Ok(plan.len())
}

/// Select the target, then publish. A failed publish is returned as a
/// warning instead of an error.
fn remote_deploy(
    remote: &RemoteDeploy,
    cwd: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<Option<DeployError>, DeployError> {
    let project = std::slice::from_ref(&remote.project);
    let select = Invocation::new(&remote.command, &[remote.select.as_slice(), project].concat(), cwd);

    runner.run(&select).map_err(|source| match source {
        ExecError::Timeout { timeout, .. } => DeployError::Timeout {
            command: select.to_string(),
            timeout,
        },
        source => DeployError::SelectionFailed {
            project: remote.project.clone(),
            source,
        },
    })?;

    let publish = Invocation::new(&remote.command, &remote.publish, cwd);
    Ok(runner
        .run(&publish)
        .err()
        .map(|source| DeployError::PublishFailed {
            project: remote.project.clone(),
            source,
        }))
}

/// `error: cause: cause` on one line.
fn describe(error: &DeployError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ============================================================================
// Tests
// ============================================================================

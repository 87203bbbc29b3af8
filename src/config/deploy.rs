//! `[deploy]` section configuration.
//!
//! Contains the ordered deployment steps and the timeout applied to every
//! external command they run.

use super::defaults;
use crate::deploy::DeployStep;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[deploy]` section in folio.toml - deployment configuration.
///
/// # Example
/// ```toml
/// [deploy]
/// timeout = "5m"
/// steps = [
///     { copy_resources = { from = "resources/.well-known", to = ".well-known" } },
///     { remote = { project = "bekditlevsen" } },
/// ]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Upper bound for each external command, in humantime syntax ("90s", "10m").
    #[serde(default = "defaults::deploy::timeout")]
    #[educe(Default = defaults::deploy::timeout())]
    pub timeout: String,

    /// Steps run in order after the site is written.
    pub steps: Vec<DeployStep>,
}

impl DeployConfig {
    pub fn timeout(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.timeout)
    }
}

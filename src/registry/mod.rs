//! HTTP clients for fetching license data from upstream package registries.
//!
//! Each registry module exposes a `fetch_license` function that returns
//! `Ok(Some(license))` on success, `Ok(None)` when the package is not found or
//! has no license field, and `Err` on network failures. [`RegistryClient`]
//! folds all of those outcomes into a single license string.

pub mod maven;
pub mod pypi;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::license::spdx::UNKNOWN;
use crate::models::{Coordinates, Dependency};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Resolves the raw license string of a dependency, one lookup at a time.
pub struct RegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl RegistryClient {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(RegistryClient {
            client,
            config: config.clone(),
        })
    }

    /// Raw license string for `dep`, or `"Unknown"` when it cannot be determined.
    ///
    /// Never fails: network errors, timeouts, missing packages and missing
    /// license fields all resolve to `"Unknown"`.
    pub async fn resolve(&self, dep: &Dependency) -> String {
        let lookup = match &dep.coordinates {
            Coordinates::StandardLibrary { license } => return license.clone(),
            Coordinates::Unmapped => {
                debug!("{} has no registry coordinates", dep.name);
                return UNKNOWN.to_string();
            }
            _ if self.config.offline => return UNKNOWN.to_string(),
            Coordinates::PyPi { project } => {
                pypi::fetch_license(
                    &self.client,
                    &self.config.pypi_url,
                    project,
                    dep.declared_version.as_deref(),
                )
                .await
            }
            Coordinates::Maven {
                group_id,
                artifact_id,
            } => {
                maven::fetch_license(
                    &self.client,
                    &self.config,
                    group_id,
                    artifact_id,
                    dep.declared_version.as_deref(),
                )
                .await
            }
        };

        match lookup {
            Ok(Some(license)) if !license.trim().is_empty() => {
                debug!("{} -> {:?}", dep.name, license);
                license
            }
            Ok(_) => {
                debug!("no license published for {}", dep.name);
                UNKNOWN.to_string()
            }
            Err(e) => {
                warn!("license lookup for {} failed: {:#}", dep.name, e);
                UNKNOWN.to_string()
            }
        }
    }
}

//! `license-rater`: find the libraries a file depends on and rate their licenses.
//!
//! # Flow
//! 1. Detect the file kind from its extension ([`detector`]).
//! 2. Extract dependencies ([`analyzer::extract_dependencies`]).
//! 3. Resolve each license from its registry, one at a time ([`registry::RegistryClient`]).
//! 4. Normalize and rate the license ([`license::classify`]).
//! 5. Render or export the records ([`report`]).
//!
//! ```no_run
//! use std::path::Path;
//! use license_rater::{check_licenses, Config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> license_rater::Result<()> {
//! let records = check_licenses(Path::new("app.py"), &Config::default()).await?;
//! for r in records {
//!     println!("{} {} {}", r.name, r.license, r.rating);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod detector;
pub mod error;
pub mod license;
pub mod models;
pub mod registry;
pub mod report;

use std::path::Path;

pub use analyzer::extract_dependencies;
pub use config::{load_config, Config};
pub use error::{Result, ScanError};
pub use license::{classify, Classification};
pub use models::{Coordinates, Dependency, Ecosystem, LicenseRecord, Rating};
pub use registry::RegistryClient;

/// Scan `path` and return one rated record per dependency, in extraction order.
///
/// Lookups run sequentially. Only an unsupported or unreadable file is an error;
/// a failed lookup yields an `Unknown`/Risky record instead.
pub async fn check_licenses(path: &Path, config: &Config) -> Result<Vec<LicenseRecord>> {
    let deps = extract_dependencies(path)?;
    let client = RegistryClient::new(&config.registry)?;

    let mut records = Vec::with_capacity(deps.len());
    for dep in &deps {
        records.push(rate_dependency(&client, dep).await);
    }
    Ok(records)
}

/// Resolve and rate a single dependency.
pub async fn rate_dependency(client: &RegistryClient, dep: &Dependency) -> LicenseRecord {
    let raw_license = client.resolve(dep).await;
    let Classification { license, rating } = classify(&raw_license);
    LicenseRecord {
        name: dep.name.clone(),
        ecosystem: dep.ecosystem,
        version: dep.declared_version.clone(),
        raw_license,
        license,
        rating,
    }
}

use serde::{Deserialize, Serialize};

/// A library reference found in the scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub ecosystem: Ecosystem,
    pub declared_version: Option<String>,
    pub coordinates: Coordinates,
}

impl Dependency {
    /// Key used to de-duplicate dependencies within one file.
    pub fn key(&self) -> String {
        match &self.coordinates {
            Coordinates::Maven {
                group_id,
                artifact_id,
            } => format!("{}:{}", group_id, artifact_id),
            Coordinates::PyPi { project } => project.to_lowercase(),
            Coordinates::StandardLibrary { .. } | Coordinates::Unmapped => self.name.clone(),
        }
    }
}

/// Where the license of a [`Dependency`] comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Coordinates {
    /// A PyPI project name.
    PyPi { project: String },
    /// Maven Central `groupId:artifactId`.
    Maven {
        group_id: String,
        artifact_id: String,
    },
    /// Bundled with the language runtime; the license is known without a lookup.
    StandardLibrary { license: String },
    /// No registry coordinates could be derived.
    Unmapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Python,
    Java,
    Maven,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Python => write!(f, "Python"),
            Ecosystem::Java => write!(f, "Java"),
            Ecosystem::Maven => write!(f, "Maven"),
        }
    }
}

/// Legal-risk tier of a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Trusted,
    Caution,
    Risky,
}

impl Rating {
    /// Higher is riskier.
    pub fn severity(self) -> u8 {
        match self {
            Rating::Trusted => 0,
            Rating::Caution => 1,
            Rating::Risky => 2,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Trusted => write!(f, "Trusted"),
            Rating::Caution => write!(f, "Caution"),
            Rating::Risky => write!(f, "Risky"),
        }
    }
}

/// One report row: a dependency joined with its resolved and rated license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub name: String,
    pub ecosystem: Ecosystem,
    pub version: Option<String>,
    /// License string as returned by the registry (or `"Unknown"`).
    pub raw_license: String,
    /// Normalized license label, e.g. `Apache-2.0` or `Unknown`.
    pub license: String,
    pub rating: Rating,
}

use std::collections::HashSet;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::analyzer::aliases::java_coordinates;
use crate::models::{Coordinates, Dependency, Ecosystem};

/// Analyzer for Java source files.
///
/// Reads `import` / `import static` statements, skips JDK packages, and maps each
/// import to Maven coordinates through the package alias table. Imports with no
/// known coordinates are kept as unmapped dependencies so they still show up in
/// the report. Results are de-duplicated by coordinates and sorted by name.
pub struct JavaAnalyzer;

impl JavaAnalyzer {
    /// Create a new `JavaAnalyzer`.
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for JavaAnalyzer {
    fn analyze(&self, content: &str) -> Result<Vec<Dependency>> {
        let re = Regex::new(r"^\s*import\s+(?:static\s+)?([A-Za-z_][\w.]*?)(?:\.\*)?\s*;")?;
        let mut deps: Vec<Dependency> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for line in content.lines() {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            let import = &caps[1];
            if import == "java" || import.starts_with("java.") {
                continue;
            }

            let dep = match java_coordinates(import) {
                Some((group_id, artifact_id)) => Dependency {
                    name: artifact_id.to_string(),
                    ecosystem: Ecosystem::Java,
                    declared_version: None,
                    coordinates: Coordinates::Maven {
                        group_id: group_id.to_string(),
                        artifact_id: artifact_id.to_string(),
                    },
                },
                None => {
                    debug!("no Maven coordinates known for import {}", import);
                    Dependency {
                        name: import.split('.').take(3).collect::<Vec<_>>().join("."),
                        ecosystem: Ecosystem::Java,
                        declared_version: None,
                        coordinates: Coordinates::Unmapped,
                    }
                }
            };

            if seen.insert(dep.key()) {
                deps.push(dep);
            }
        }

        deps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(deps)
    }
}

use std::collections::HashSet;

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{info, warn};

use crate::models::{Coordinates, Dependency, Ecosystem};

/// Analyzer for Maven `pom.xml` files.
///
/// Reads every `<dependency>` inside a `<dependencies>` block with the quick-xml
/// event API. Aggregator POMs (`<packaging>pom</packaging>` plus `<modules>`)
/// declare no dependencies of their own and yield nothing. Dependencies are
/// de-duplicated by `groupId:artifactId`, in document order.
pub struct MavenAnalyzer;

impl MavenAnalyzer {
    /// Create a new `MavenAnalyzer`.
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for MavenAnalyzer {
    fn analyze(&self, content: &str) -> Result<Vec<Dependency>> {
        let pom = parse_pom_xml(content);
        if pom.is_aggregator() {
            info!("skipping aggregator POM (packaging=pom with <modules>)");
            return Ok(Vec::new());
        }

        let mut seen: HashSet<String> = HashSet::new();
        Ok(pom
            .dependencies
            .into_iter()
            .filter(|d| seen.insert(d.key()))
            .collect())
    }
}

#[derive(Debug, Default)]
struct ParsedPom {
    packaging: Option<String>,
    has_modules: bool,
    dependencies: Vec<Dependency>,
}

impl ParsedPom {
    fn is_aggregator(&self) -> bool {
        self.packaging.as_deref() == Some("pom") && self.has_modules
    }
}

fn make_dep(group_id: &str, artifact_id: &str, version: &str) -> Dependency {
    // Property references cannot be resolved from a single file
    let declared_version = if version.is_empty() || version.contains("${") {
        None
    } else {
        Some(version.to_string())
    };
    Dependency {
        name: artifact_id.to_string(),
        ecosystem: Ecosystem::Maven,
        declared_version,
        coordinates: Coordinates::Maven {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        },
    }
}

/// Parse a POM; on malformed XML the dependencies read so far are kept.
fn parse_pom_xml(content: &str) -> ParsedPom {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut pom = ParsedPom::default();
    let mut buf = Vec::new();

    let mut in_dependencies = false;
    let mut depth: u32 = 0;
    let mut dependencies_depth: u32 = 0;

    let mut in_dependency = false;
    let mut dependency_depth: u32 = 0;
    let mut current_tag = String::new();
    let mut group_id = String::new();
    let mut artifact_id = String::new();
    let mut version = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                current_tag = name.clone();

                match name.as_str() {
                    // Direct children of <project> sit at depth 2
                    "modules" if depth == 2 => pom.has_modules = true,
                    "dependencies" if !in_dependency => {
                        in_dependencies = true;
                        dependencies_depth = depth;
                    }
                    "dependency" if in_dependencies && !in_dependency => {
                        in_dependency = true;
                        dependency_depth = depth;
                        group_id.clear();
                        artifact_id.clear();
                        version.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 1 && e.name().local_name().as_ref() == b"modules" {
                    pom.has_modules = true;
                }
            }
            Ok(Event::End(ref e)) => {
                let name =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();

                if name == "dependency" && in_dependency && depth == dependency_depth {
                    if group_id.is_empty() || artifact_id.is_empty() {
                        warn!(
                            "skipping incomplete dependency in pom.xml: group={:?}, artifact={:?}",
                            group_id, artifact_id
                        );
                    } else {
                        pom.dependencies
                            .push(make_dep(&group_id, &artifact_id, &version));
                    }
                    in_dependency = false;
                } else if name == "dependencies" && depth == dependencies_depth {
                    in_dependencies = false;
                }

                depth = depth.saturating_sub(1);
                current_tag.clear();
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                // Only direct children; <exclusions> carry their own coordinates
                if in_dependency && depth == dependency_depth + 1 {
                    match current_tag.as_str() {
                        "groupId" => group_id = text.trim().to_string(),
                        "artifactId" => artifact_id = text.trim().to_string(),
                        "version" => version = text.trim().to_string(),
                        _ => {}
                    }
                } else if !in_dependency && depth == 2 && current_tag == "packaging" {
                    pom.packaging = Some(text.trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(
                    "malformed pom.xml at byte {}: {}; keeping {} dependencies read so far",
                    reader.buffer_position(),
                    e,
                    pom.dependencies.len()
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    pom
}

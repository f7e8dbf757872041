use std::collections::{BTreeSet, HashSet};

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::analyzer::aliases::{is_python_stdlib, pypi_project, PYTHON_STDLIB_LICENSE};
use crate::models::{Coordinates, Dependency, Ecosystem};

/// Analyzer for Python source files.
///
/// Collects the top-level package of every `import x.y` and `from x.y import z`
/// statement, wherever it appears. Relative imports are skipped. Results are
/// de-duplicated and sorted by name.
pub struct PythonAnalyzer;

impl PythonAnalyzer {
    /// Create a new `PythonAnalyzer`.
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for PythonAnalyzer {
    fn analyze(&self, content: &str) -> Result<Vec<Dependency>> {
        let re_import = Regex::new(r"^\s*import\s+(.+)$")?;
        let re_from = Regex::new(r"^\s*from\s+(\S+)\s+import\b")?;

        let mut modules: BTreeSet<String> = BTreeSet::new();
        let mut open_string: Option<&str> = None;

        for line in content.lines() {
            if let Some(delim) = open_string {
                if line.matches(delim).count() % 2 == 1 {
                    open_string = None;
                }
                continue;
            }
            if let Some(delim) = ["\"\"\"", "'''"]
                .into_iter()
                .find(|d| line.matches(d).count() % 2 == 1)
            {
                open_string = Some(delim);
                continue;
            }

            let code = line.split('#').next().unwrap_or_default();

            for statement in code.split(';') {
                if let Some(caps) = re_from.captures(statement) {
                    let module = &caps[1];
                    if module.starts_with('.') {
                        debug!("skipping relative import {}", module);
                        continue;
                    }
                    if let Some(top) = top_level(module) {
                        modules.insert(top);
                    }
                } else if let Some(caps) = re_import.captures(statement) {
                    for part in caps[1].split(',') {
                        let path = part.split_whitespace().next().unwrap_or_default();
                        if let Some(top) = top_level(path) {
                            modules.insert(top);
                        }
                    }
                }
            }
        }

        modules.remove("__future__");
        Ok(modules.into_iter().map(make_dep).collect())
    }
}

/// Analyzer for pip `requirements*.txt` files.
///
/// Keeps the first occurrence of each project (case-insensitive), in file order.
/// Pinned `==` versions are recorded as the declared version.
pub struct RequirementsAnalyzer;

impl RequirementsAnalyzer {
    /// Create a new `RequirementsAnalyzer`.
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for RequirementsAnalyzer {
    fn analyze(&self, content: &str) -> Result<Vec<Dependency>> {
        let re = Regex::new(
            r"^([A-Za-z0-9][A-Za-z0-9._\-]*)\s*(?:\[[^\]]*\])?\s*(?:==\s*([^\s;,]+))?",
        )?;
        let mut deps = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for line in content.lines() {
            let line = line.split(" #").next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }
            let Some(spec) = project_spec(line) else {
                debug!("skipping direct URL requirement {:?}", line);
                continue;
            };
            let Some(caps) = re.captures(spec) else {
                debug!("skipping unparseable requirement {:?}", line);
                continue;
            };
            let name = caps[1].to_string();
            if !seen.insert(name.to_lowercase()) {
                continue;
            }
            deps.push(Dependency {
                coordinates: Coordinates::PyPi {
                    project: name.clone(),
                },
                name,
                ecosystem: Ecosystem::Python,
                declared_version: caps.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Ok(deps)
    }
}

const VCS_PREFIXES: &[&str] = &["git+", "hg+", "svn+", "bzr+"];

/// The part of a requirement line that names the project.
///
/// `name @ url` yields `name`, a URL or VCS line yields its `#egg=` name, and a
/// URL without one yields `None`.
fn project_spec(line: &str) -> Option<&str> {
    if let Some((name, _)) = line.split_once('@') {
        if !name.contains("://") && !name.trim().is_empty() {
            return Some(name.trim());
        }
    }
    if line.contains("://") || VCS_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return line
            .split_once("#egg=")
            .and_then(|(_, egg)| egg.split(['&', ' ']).next())
            .filter(|egg| !egg.is_empty());
    }
    Some(line)
}

/// First dotted segment of a module path, if it is a valid identifier.
fn top_level(path: &str) -> Option<String> {
    let top = path.split('.').next()?;
    let mut chars = top.chars();
    let first = chars.next()?;
    if (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_') {
        Some(top.to_string())
    } else {
        None
    }
}

fn make_dep(module: String) -> Dependency {
    let coordinates = if is_python_stdlib(&module) {
        Coordinates::StandardLibrary {
            license: PYTHON_STDLIB_LICENSE.to_string(),
        }
    } else {
        Coordinates::PyPi {
            project: pypi_project(&module).to_string(),
        }
    };
    Dependency {
        name: module,
        ecosystem: Ecosystem::Python,
        declared_version: None,
        coordinates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;

    fn names(deps: &[Dependency]) -> Vec<&str> {
        deps.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_import_forms() {
        let src = r#"
import os, sys
import numpy as np
import matplotlib.pyplot as plt
from flask import Flask, render_template_string
from sklearn.linear_model import LinearRegression
from . import my_module
from .utils import helper
from __future__ import annotations

def process():
    try:
        import PIL  # MIT
    except ImportError:
        pass
"#;
        let deps = PythonAnalyzer::new().analyze(src).unwrap();
        assert_eq!(
            names(&deps),
            vec!["PIL", "flask", "matplotlib", "numpy", "os", "sklearn", "sys"]
        );
    }

    #[test]
    fn test_coordinates() {
        let deps = PythonAnalyzer::new().analyze("import sklearn\nimport hashlib\nimport flask\n").unwrap();
        let by_name = |n: &str| deps.iter().find(|d| d.name == n).unwrap().coordinates.clone();

        assert_eq!(
            by_name("sklearn"),
            Coordinates::PyPi {
                project: "scikit-learn".to_string()
            }
        );
        assert_eq!(
            by_name("hashlib"),
            Coordinates::StandardLibrary {
                license: "PSF-2.0".to_string()
            }
        );
        assert_eq!(
            by_name("flask"),
            Coordinates::PyPi {
                project: "flask".to_string()
            }
        );
    }

    #[test]
    fn test_ignores_docstrings_and_comments() {
        let src = r#"
"""
Example usage:
    import pandas
"""
# import torch
x = 1  # import scipy
import requests
'''single-line docstring import yaml'''
"#;
        let deps = PythonAnalyzer::new().analyze(src).unwrap();
        assert_eq!(names(&deps), vec!["requests"]);
    }

    #[test]
    fn test_unparseable_lines_skipped() {
        let src = "import 123abc\nimport\nimport requests\nfrom import x\n";
        let deps = PythonAnalyzer::new().analyze(src).unwrap();
        assert_eq!(names(&deps), vec!["requests"]);
    }

    #[test]
    fn test_idempotent() {
        let src = "import flask\nimport requests\nfrom flask import Flask\n";
        let a = PythonAnalyzer::new().analyze(src).unwrap();
        let b = PythonAnalyzer::new().analyze(src).unwrap();
        assert_eq!(a, b);
        assert_eq!(names(&a), vec!["flask", "requests"]);
    }

    #[test]
    fn test_requirements() {
        let src = "\
# comment
-r base.txt
requests==2.28.1
flask>=2.0.0
uvicorn[standard]==0.23.2 ; python_version >= '3.8'
Requests==2.0
numpy  # pinned elsewhere
";
        let deps = RequirementsAnalyzer::new().analyze(src).unwrap();
        assert_eq!(names(&deps), vec!["requests", "flask", "uvicorn", "numpy"]);
        assert_eq!(deps[0].declared_version.as_deref(), Some("2.28.1"));
        assert_eq!(deps[1].declared_version, None);
        assert_eq!(deps[2].declared_version.as_deref(), Some("0.23.2"));
    }

    #[test]
    fn test_several_statements_on_one_line() {
        let src = "import os; import sys
x = 1; from flask import Flask
";
        let deps = PythonAnalyzer::new().analyze(src).unwrap();
        assert_eq!(names(&deps), vec!["flask", "os", "sys"]);
    }

    #[test]
    fn test_requirements_direct_references() {
        let src = "\
git+https://github.com/psf/requests.git#egg=requests
https://example.com/pkg-1.0.whl
git+ssh://git@github.com/org/private.git
attrs @ https://github.com/python-attrs/attrs/archive/main.zip
django==4.2
";
        let deps = RequirementsAnalyzer::new().analyze(src).unwrap();
        assert_eq!(names(&deps), vec!["requests", "attrs", "django"]);
        assert!(deps.iter().all(|d| d.declared_version.as_deref() != Some("1.0")));
        assert_eq!(deps[2].declared_version.as_deref(), Some("4.2"));
    }
}

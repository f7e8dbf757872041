//! Dependency extraction, one analyzer per supported file kind.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::detector::{detect_file_kind, FileKind};
use crate::error::ScanError;
use crate::models::Dependency;

pub mod aliases;
pub mod java;
pub mod maven;
pub mod python;

/// Turns the text of one file into the dependencies it declares or imports.
///
/// Analyzers are best-effort: lines they cannot make sense of are skipped.
pub trait Analyzer {
    fn analyze(&self, content: &str) -> Result<Vec<Dependency>>;
}

/// The analyzer for a given file kind.
pub fn analyzer_for(kind: FileKind) -> Box<dyn Analyzer> {
    match kind {
        FileKind::PythonSource => Box::new(python::PythonAnalyzer::new()),
        FileKind::Requirements => Box::new(python::RequirementsAnalyzer::new()),
        FileKind::JavaSource => Box::new(java::JavaAnalyzer::new()),
        FileKind::MavenPom => Box::new(maven::MavenAnalyzer::new()),
    }
}

/// Read `path` and extract its dependencies.
///
/// Fails with [`ScanError::UnsupportedFileType`] before touching the file when the
/// extension is not recognized, and with [`ScanError::Unreadable`] when it cannot be read.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn extract_dependencies(path: &Path) -> crate::error::Result<Vec<Dependency>> {
    let kind = detect_file_kind(path)?;
    let bytes = std::fs::read(path).map_err(|source| ScanError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let deps = analyzer_for(kind).analyze(&content)?;
    debug!("{:?} {} yielded {} dependencies", kind, path.display(), deps.len());
    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_extract_from_file() {
        let mut f = Builder::new().suffix(".py").tempfile().unwrap();
        writeln!(f, "import flask").unwrap();
        writeln!(f, "import requests").unwrap();

        let deps = extract_dependencies(f.path()).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].name, "flask");

        // Same file, same result
        assert_eq!(extract_dependencies(f.path()).unwrap(), deps);
    }

    #[test]
    fn test_unsupported_extension() {
        let f = Builder::new().suffix(".gradle").tempfile().unwrap();
        assert!(matches!(
            extract_dependencies(f.path()),
            Err(ScanError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.py");
        assert!(matches!(
            extract_dependencies(&missing),
            Err(ScanError::Unreadable { .. })
        ));
    }
}

use std::path::Path;

use crate::error::{Result, ScanError};

/// Syntax of the scanned file, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PythonSource,
    Requirements,
    JavaSource,
    MavenPom,
}

/// Detect the file kind from the extension (case-insensitive).
pub fn detect_file_kind(path: &Path) -> Result<FileKind> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "py" => Ok(FileKind::PythonSource),
        "java" => Ok(FileKind::JavaSource),
        "xml" => Ok(FileKind::MavenPom),
        "txt" if file_name.starts_with("requirements") => Ok(FileKind::Requirements),
        _ => Err(ScanError::UnsupportedFileType(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_supported() {
        assert_eq!(
            detect_file_kind(Path::new("app/main.py")).unwrap(),
            FileKind::PythonSource
        );
        assert_eq!(
            detect_file_kind(Path::new("Main.JAVA")).unwrap(),
            FileKind::JavaSource
        );
        assert_eq!(
            detect_file_kind(Path::new("pom.xml")).unwrap(),
            FileKind::MavenPom
        );
        assert_eq!(
            detect_file_kind(Path::new("requirements-dev.txt")).unwrap(),
            FileKind::Requirements
        );
    }

    #[test]
    fn test_detect_unsupported() {
        for name in ["build.gradle", "notes.txt", "Makefile", "package.json"] {
            assert!(matches!(
                detect_file_kind(Path::new(name)),
                Err(ScanError::UnsupportedFileType(_))
            ));
        }
    }
}

//! Resolving the search input (directory, single file or glob pattern) into
//! a sorted list of document paths.

use std::fs;
use std::path::{Path, PathBuf};

/// Check if a path string contains glob pattern characters.
pub fn is_glob_pattern(path: &str) -> bool {
    path.contains('*') || path.contains('?') || path.contains('[')
}

/// Expand the search input into the files to scan.
///
/// - a glob pattern expands to every matching file
/// - a directory yields its direct `.xml` children (no recursion)
/// - a plain file yields itself
///
/// # Errors
///
/// Returns an error if the pattern is invalid, the path does not exist, or
/// the directory cannot be listed.
pub fn collect_xml_files(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let input_str = input.to_string_lossy();

    let mut files = if is_glob_pattern(&input_str) {
        expand_glob(&input_str)?
    } else if input.is_dir() {
        list_xml_dir(input)?
    } else if input.is_file() {
        vec![input.to_path_buf()]
    } else {
        anyhow::bail!("input does not exist: {}", input.display());
    };

    files.sort();
    Ok(files)
}

fn expand_glob(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = glob::glob(pattern)
        .map_err(|e| anyhow::anyhow!("invalid glob pattern '{}': {}", pattern, e))?;
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                anyhow::bail!("error reading path for pattern '{}': {}", pattern, e);
            }
        }
    }
    Ok(files)
}

fn list_xml_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("cannot read directory {}: {}", dir.display(), e))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_xml_extension(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_glob_pattern() {
        assert!(!is_glob_pattern("xml_files"));
        assert!(!is_glob_pattern("/path/to/item000001.xml"));
        assert!(is_glob_pattern("*.xml"));
        assert!(is_glob_pattern("xml_files/item00000?.xml"));
        assert!(is_glob_pattern("**/*.xml"));
        assert!(is_glob_pattern("[ab].xml"));
    }

    #[test]
    fn test_directory_lists_only_xml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.xml"), "<stockItem/>").unwrap();
        fs::write(dir.path().join("a.XML"), "<stockItem/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = collect_xml_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.XML", "b.xml"]);
    }

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("item000001.xml");
        fs::write(&file, "<stockItem/>").unwrap();
        assert_eq!(collect_xml_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_missing_input() {
        let err = collect_xml_files(Path::new("/nonexistent/xml_files")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_glob_pattern() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("item000001.xml"), "").unwrap();
        fs::write(dir.path().join("item000002.xml"), "").unwrap();
        fs::write(dir.path().join("item000010.xml"), "").unwrap();

        let pattern = dir.path().join("item00000?.xml");
        let files = collect_xml_files(&pattern).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_glob_no_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.xml");
        assert!(collect_xml_files(&pattern).unwrap().is_empty());
    }
}

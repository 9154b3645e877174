// src/discovery.rs
//! Expands command-line paths into the report files to analyze.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::REPORT_EXTENSIONS;
use crate::error::{Result, StimtraceError};

/// Files are taken as given; directories are walked for `.html`/`.htm`
/// files. The result is sorted and free of duplicates.
///
/// # Errors
/// Returns error if a path does not exist, a walk fails, or nothing is found.
pub fn discover(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(walk_reports(input)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(StimtraceError::io(
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
                input,
            ));
        }
    }
    files.sort();
    files.dedup();
    if files.is_empty() {
        return Err(StimtraceError::NoDocuments);
    }
    tracing::debug!(count = files.len(), "discovered report files");
    Ok(files)
}

fn walk_reports(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() && is_report(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn is_report(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            REPORT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walks_directories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("day2");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("b.html"), "").unwrap();
        fs::write(nested.join("a.HTM"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = discover(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b.html", "a.HTM"]);
    }

    #[test]
    fn test_explicit_file_kept_and_deduped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("run.log");
        fs::write(&file, "").unwrap();
        let files = discover(&[file.clone(), file.clone()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_empty_directory_is_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, StimtraceError::NoDocuments));
    }

    #[test]
    fn test_missing_path_is_io() {
        let err = discover(&[PathBuf::from("/nonexistent/stimtrace")]).unwrap_err();
        assert!(matches!(err, StimtraceError::Io { .. }));
    }
}

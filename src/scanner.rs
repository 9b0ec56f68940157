//! Directory scanner
//!
//! Lists the source files sitting directly inside one directory. The listing
//! is sorted so that regenerated output is byte-identical when nothing on
//! disk changed.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{GenError, GenResult};

/// Decides whether a file name counts as a source file.
pub trait FileFilter {
    fn accepts(&self, file_name: &str) -> bool;
}

impl<F> FileFilter for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, file_name: &str) -> bool {
        self(file_name)
    }
}

/// Accepts names ending in one of a set of extensions (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Extensions are matched as suffixes, so include the dot: `".cpp"`.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(Into::into)
                .filter(|ext: &String| !ext.is_empty())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new([".cpp"])
    }
}

impl FileFilter for ExtensionFilter {
    fn accepts(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// Sorted list of file names found in one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    names: Vec<String>,
}

impl FileSet {
    /// Build a set from arbitrary names; the result is always sorted.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// List the files directly inside `dir` that `filter` accepts.
///
/// A missing directory (or a path that is not a directory) yields an empty
/// set. Subdirectories are never descended into.
pub fn scan_dir(dir: &Path, filter: &dyn FileFilter) -> GenResult<FileSet> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "directory not present, nothing to scan");
        return Ok(FileSet::default());
    }

    let scan_err = |source: std::io::Error| GenError::ScanDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;

        // fs::metadata follows symlinks; a dangling link is simply skipped.
        let is_file = match fs::metadata(entry.path()) {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(scan_err(e)),
        };
        if !is_file {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!(entry = ?file_name, dir = %dir.display(), "skipping non UTF-8 file name");
            continue;
        };

        if filter.accepts(name) {
            trace!(file = name, "accepted");
            names.push(name.to_string());
        }
    }

    let files = FileSet::from_names(names);
    debug!(dir = %dir.display(), count = files.len(), "scanned directory");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn scan_returns_sorted_matching_files() {
        let dir = tempdir().unwrap();
        for name in ["b.cpp", "a.cpp", "main.cpp", "notes.txt", "header.hpp"] {
            touch(dir.path(), name);
        }

        let files = scan_dir(dir.path(), &ExtensionFilter::default()).unwrap();

        assert_eq!(files.names(), ["a.cpp", "b.cpp", "main.cpp"]);
    }

    #[test]
    fn scan_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let files = scan_dir(&missing, &ExtensionFilter::default()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn scan_regular_file_path_is_empty() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src");

        let files = scan_dir(&dir.path().join("src"), &ExtensionFilter::default()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn scan_ignores_subdirectories_even_with_matching_names() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.cpp")).unwrap();
        fs::create_dir(dir.path().join("deeper")).unwrap();
        touch(&dir.path().join("deeper"), "inner.cpp");
        touch(dir.path(), "top.cpp");

        let files = scan_dir(dir.path(), &ExtensionFilter::default()).unwrap();

        assert_eq!(files.names(), ["top.cpp"]);
    }

    #[test]
    fn extension_match_is_case_sensitive_suffix() {
        let filter = ExtensionFilter::default();

        assert!(filter.accepts("x.cpp"));
        assert!(!filter.accepts("x.CPP"));
        assert!(!filter.accepts("x.cpp.bak"));
        assert!(!filter.accepts("x.cc"));
    }

    #[test]
    fn extension_filter_with_several_extensions() {
        let dir = tempdir().unwrap();
        for name in ["a.cc", "b.cpp", "c.cxx"] {
            touch(dir.path(), name);
        }

        let filter = ExtensionFilter::new([".cc", ".cpp"]);
        let files = scan_dir(dir.path(), &filter).unwrap();

        assert_eq!(files.names(), ["a.cc", "b.cpp"]);
    }

    #[test]
    fn closures_work_as_filters() {
        let dir = tempdir().unwrap();
        for name in ["test_a.cpp", "helper.cpp"] {
            touch(dir.path(), name);
        }

        let only_tests = |name: &str| name.starts_with("test_");
        let files = scan_dir(dir.path(), &only_tests).unwrap();

        assert_eq!(files.names(), ["test_a.cpp"]);
    }

    #[test]
    fn file_set_sorts_by_byte_order() {
        let files = FileSet::from_names(["b.cpp", "B.cpp", "a.cpp", "_x.cpp"]);
        assert_eq!(files.names(), ["B.cpp", "_x.cpp", "a.cpp", "b.cpp"]);
    }
}

//! Entry point / common source split

use tracing::debug;

use crate::scanner::FileSet;

/// The source directory listing, split into the program entry and the rest.
///
/// Paths are `<dir>/<file>` so they can be dropped straight into the build
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub entry_point: Option<String>,
    pub common_sources: Vec<String>,
}

impl Classification {
    pub fn has_entry_point(&self) -> bool {
        self.entry_point.is_some()
    }
}

/// Join a directory and a file name with `/`, the separator CMake expects on
/// every platform.
pub fn join_path(dir: &str, file_name: &str) -> String {
    if dir.is_empty() {
        return file_name.to_string();
    }
    let trimmed = dir.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        // `dir` was nothing but separators: the filesystem root.
        format!("/{}", file_name)
    } else {
        format!("{}/{}", trimmed, file_name)
    }
}

/// Split `files` (found in `dir`) into the entry point named `entry_point`
/// and everything else.
///
/// The first exact match in sorted order wins; any later match stays a
/// common source.
pub fn classify(dir: &str, files: &FileSet, entry_point: &str) -> Classification {
    let mut classification = Classification::default();

    for name in files {
        let path = join_path(dir, name);
        if classification.entry_point.is_none() && name == entry_point {
            classification.entry_point = Some(path);
        } else {
            classification.common_sources.push(path);
        }
    }

    debug!(
        entry_point = ?classification.entry_point,
        common = classification.common_sources.len(),
        "classified sources"
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_is_split_from_common_sources() {
        let files = FileSet::from_names(["b.cpp", "a.cpp", "main.cpp"]);

        let classification = classify("src", &files, "main.cpp");

        assert_eq!(classification.entry_point.as_deref(), Some("src/main.cpp"));
        assert_eq!(classification.common_sources, ["src/a.cpp", "src/b.cpp"]);
    }

    #[test]
    fn no_entry_point_keeps_every_file_common() {
        let files = FileSet::from_names(["util.cpp", "io.cpp"]);

        let classification = classify("src", &files, "main.cpp");

        assert!(!classification.has_entry_point());
        assert_eq!(classification.common_sources, ["src/io.cpp", "src/util.cpp"]);
    }

    #[test]
    fn empty_listing_classifies_to_nothing() {
        let classification = classify("src", &FileSet::default(), "main.cpp");
        assert_eq!(classification, Classification::default());
    }

    #[test]
    fn match_is_exact_not_prefix_or_case_insensitive() {
        let files = FileSet::from_names(["Main.cpp", "main.cpp.in.cpp", "my_main.cpp"]);

        let classification = classify("src", &files, "main.cpp");

        assert!(classification.entry_point.is_none());
        assert_eq!(classification.common_sources.len(), 3);
    }

    #[test]
    fn custom_entry_point_name() {
        let files = FileSet::from_names(["app.cc", "lib.cc"]);

        let classification = classify("source", &files, "app.cc");

        assert_eq!(classification.entry_point.as_deref(), Some("source/app.cc"));
        assert_eq!(classification.common_sources, ["source/lib.cc"]);
    }

    #[test]
    fn join_path_does_not_double_separators() {
        assert_eq!(join_path("src/", "a.cpp"), "src/a.cpp");
        assert_eq!(join_path("src", "a.cpp"), "src/a.cpp");
        assert_eq!(join_path(".", "a.cpp"), "./a.cpp");
        assert_eq!(join_path("", "a.cpp"), "a.cpp");
    }

    #[test]
    fn join_path_keeps_a_root_directory_absolute() {
        assert_eq!(join_path("/", "a.cpp"), "/a.cpp");
        assert_eq!(join_path("//", "a.cpp"), "/a.cpp");
        assert_eq!(join_path("/opt/src/", "a.cpp"), "/opt/src/a.cpp");
    }
}

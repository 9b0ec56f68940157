//! CMakeLists.txt rendering
//!
//! The document is built line by line in a fixed order:
//!
//! 1. Preamble (minimum version, project, C++ standard, include path,
//!    `enable_testing()`)
//! 2. One `add_executable` + `add_test` block per test file, in sorted order
//! 3. The main program target, only when an entry point was found

use std::borrow::Cow;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::classifier::{join_path, Classification};
use crate::config::Config;
use crate::scanner::FileSet;

/// Generated build file, one entry per output line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDocument {
    lines: Vec<String>,
}

impl BuildDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Final file content: lines joined by `\n`.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// `sha256:<hex>` fingerprint of the rendered content
    pub fn content_hash(&self) -> String {
        let digest = Sha256::digest(self.render().as_bytes());
        format!("sha256:{:x}", digest)
    }
}

/// One test executable derived from a test source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTarget {
    pub name: String,
    pub source: String,
}

/// Target name for a test file: the file name minus its last extension.
pub fn target_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

/// Test targets in the order they will be emitted
pub fn test_targets(test_dir: &str, tests: &FileSet) -> Vec<TestTarget> {
    tests
        .iter()
        .map(|file| TestTarget {
            name: target_name(file).to_string(),
            source: join_path(test_dir, file),
        })
        .collect()
}

/// Quote a command argument when CMake would otherwise split or misread it.
pub fn cmake_arg(arg: &str) -> Cow<'_, str> {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | '(' | ')' | '"' | '#' | '\\'));
    if !needs_quotes {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

fn add_executable(name: &str, first: &str, common: &[String]) -> String {
    let mut line = format!("add_executable({} {}", cmake_arg(name), cmake_arg(first));
    for source in common {
        line.push(' ');
        line.push_str(&cmake_arg(source));
    }
    line.push(')');
    line
}

/// Render the complete build document.
pub fn render(config: &Config, tests: &FileSet, classification: &Classification) -> BuildDocument {
    let project = &config.project;
    let mut doc = BuildDocument::default();

    doc.push(format!(
        "cmake_minimum_required(VERSION {})",
        project.cmake_minimum
    ));
    doc.push(format!("project({})", cmake_arg(&project.name)));
    doc.push(format!("set(CMAKE_CXX_STANDARD {})", project.cxx_standard));
    doc.blank();
    doc.push(format!(
        "include_directories({})",
        cmake_arg(&config.layout.include_dir)
    ));
    doc.blank();
    doc.push("enable_testing()");

    let common = &classification.common_sources;

    for test in test_targets(&config.layout.test_dir, tests) {
        doc.push(add_executable(&test.name, &test.source, common));
        doc.push(format!(
            "add_test(NAME {name} COMMAND {name})",
            name = cmake_arg(&test.name)
        ));
        doc.blank();
    }

    if let Some(entry) = &classification.entry_point {
        doc.push(add_executable(&project.name, entry, common));
        doc.blank();
    }

    doc
}

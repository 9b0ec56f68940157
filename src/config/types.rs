//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

use super::loader::{self, ConfigWarning};

/// Project-level settings rendered into the preamble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,

    #[serde(default = "default_cxx_standard")]
    pub cxx_standard: u32,

    #[serde(default = "default_cmake_minimum")]
    pub cmake_minimum: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            cxx_standard: default_cxx_standard(),
            cmake_minimum: default_cmake_minimum(),
        }
    }
}

fn default_project_name() -> String {
    "main".to_string()
}

fn default_cxx_standard() -> u32 {
    17
}

fn default_cmake_minimum() -> String {
    "3.10".to_string()
}

/// Directory layout, relative to the invocation directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    #[serde(default = "default_test_dir")]
    pub test_dir: String,

    #[serde(default = "default_include_dir")]
    pub include_dir: String,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            test_dir: default_test_dir(),
            include_dir: default_include_dir(),
            output: default_output(),
        }
    }
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_test_dir() -> String {
    "tests".to_string()
}

fn default_include_dir() -> String {
    "include".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("CMakeLists.txt")
}

/// Which files count as sources, and which one is the program entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_entry_point")]
    pub entry_point: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            entry_point: default_entry_point(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![".cpp".to_string()]
}

fn default_entry_point() -> String {
    "main.cpp".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub sources: SourcesConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GenResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Reject values that would produce a broken build file.
    pub fn validate(&self, origin: &Path) -> GenResult<()> {
        let invalid = |message: &str| GenError::InvalidConfig {
            file: origin.to_path_buf(),
            message: message.to_string(),
        };

        if self.project.name.trim().is_empty() {
            return Err(invalid("project name must not be empty"));
        }
        if self.project.name.chars().any(char::is_whitespace) {
            return Err(invalid("project name must not contain whitespace"));
        }
        if self.project.cmake_minimum.trim().is_empty() {
            return Err(invalid("cmake_minimum must not be empty"));
        }
        if self.sources.extensions.iter().all(|ext| ext.is_empty()) {
            return Err(invalid("at least one source extension is required"));
        }
        if self.sources.entry_point.is_empty() {
            return Err(invalid("entry_point must not be empty"));
        }
        if self.layout.output.as_os_str().is_empty() {
            return Err(invalid("output path must not be empty"));
        }
        Ok(())
    }
}

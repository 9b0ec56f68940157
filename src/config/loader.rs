//! Configuration loading and layering

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{GenError, GenResult};

use super::types::Config;

/// Config file looked up in the invocation directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "cmakegen.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub project_name: Option<String>,
    pub cxx_standard: Option<u32>,
    pub src_dir: Option<String>,
    pub test_dir: Option<String>,
    pub include_dir: Option<String>,
    pub output: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> GenResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| GenError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GenError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            // serde_ignored reports `section.key`, or just `key` at top level.
            let (section, key) = path_str.rsplit_once('.').unwrap_or(("", path_str.as_str()));
            ConfigWarning {
                key: key.to_string(),
                file: path.to_path_buf(),
                line: find_key_line(&content, section, key),
                suggestion: suggest_key(section, key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Build the effective configuration.
///
/// Layers, lowest to highest: defaults, config file, `CMAKEGEN_*` variables
/// (read through `env`), command-line overrides.
///
/// `explicit` marks a config path the user asked for; only then is a missing
/// file an error.
pub fn resolve<F>(
    config_path: &Path,
    explicit: bool,
    env: F,
    overrides: &Overrides,
) -> GenResult<(Config, Vec<ConfigWarning>)>
where
    F: Fn(&str) -> Option<String>,
{
    let (config, warnings) = if config_path.is_file() {
        debug!(path = %config_path.display(), "loading config file");
        load_with_warnings(config_path)?
    } else if explicit && config_path.exists() {
        return Err(GenError::ConfigNotFile {
            path: config_path.to_path_buf(),
        });
    } else if explicit {
        return Err(GenError::ConfigNotFound {
            path: config_path.to_path_buf(),
        });
    } else {
        debug!(path = %config_path.display(), "no config file, using defaults");
        (Config::default(), Vec::new())
    };

    for warning in &warnings {
        warn!("{}", warning);
    }

    let config = apply_overrides(with_env_overrides(config, env), overrides);
    config.validate(config_path)?;
    Ok((config, warnings))
}

/// Apply environment variable overrides (CMAKEGEN_* prefix)
pub fn with_env_overrides<F>(mut config: Config, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = env("CMAKEGEN_PROJECT_NAME") {
        config.project.name = name;
    }

    if let Some(raw) = env("CMAKEGEN_CXX_STANDARD") {
        match raw.trim().parse::<u32>() {
            Ok(standard) => config.project.cxx_standard = standard,
            Err(_) => warn!(value = %raw, "ignoring non-numeric CMAKEGEN_CXX_STANDARD"),
        }
    }

    if let Some(dir) = env("CMAKEGEN_SRC_DIR") {
        config.layout.src_dir = dir;
    }

    if let Some(dir) = env("CMAKEGEN_TEST_DIR") {
        config.layout.test_dir = dir;
    }

    if let Some(dir) = env("CMAKEGEN_INCLUDE_DIR") {
        config.layout.include_dir = dir;
    }

    if let Some(output) = env("CMAKEGEN_OUTPUT") {
        config.layout.output = PathBuf::from(output);
    }

    config
}

/// Apply command-line overrides on top of everything else
pub fn apply_overrides(mut config: Config, overrides: &Overrides) -> Config {
    if let Some(name) = &overrides.project_name {
        config.project.name = name.clone();
    }
    if let Some(standard) = overrides.cxx_standard {
        config.project.cxx_standard = standard;
    }
    if let Some(dir) = &overrides.src_dir {
        config.layout.src_dir = dir.clone();
    }
    if let Some(dir) = &overrides.test_dir {
        config.layout.test_dir = dir.clone();
    }
    if let Some(dir) = &overrides.include_dir {
        config.layout.include_dir = dir.clone();
    }
    if let Some(output) = &overrides.output {
        config.layout.output = output.clone();
    }
    config
}

/// Keys each config table accepts; `""` is the top level.
fn section_keys(section: &str) -> &'static [&'static str] {
    match section {
        "" => &["project", "layout", "sources"],
        "project" => &["name", "cxx_standard", "cmake_minimum"],
        "layout" => &["src_dir", "test_dir", "include_dir", "output"],
        "sources" => &["extensions", "entry_point"],
        _ => &[],
    }
}

/// 1-based line where `key` is assigned (or, at top level, declared as a
/// table) inside `[section]`.
fn find_key_line(content: &str, section: &str, key: &str) -> Option<usize> {
    let mut current = String::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('[') {
            let name = header.trim_end_matches(']').trim();
            if section.is_empty() && name == key {
                return Some(i + 1);
            }
            current = name.to_string();
            continue;
        }
        let assigned = line
            .split_once('=')
            .map(|(lhs, _)| lhs.trim().trim_matches('"'));
        if current == section && assigned == Some(key) {
            return Some(i + 1);
        }
    }
    None
}

/// Closest known key of the same section, if it is a likely typo.
fn suggest_key(section: &str, unknown: &str) -> Option<String> {
    section_keys(section)
        .iter()
        .map(|candidate| (*candidate, strsim::levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

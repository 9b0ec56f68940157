//! Generation pipeline
//!
//! ## Flow
//!
//! 1. Scan the source and test directories
//! 2. Classify the source listing into entry point and common sources
//! 3. Render the build document
//! 4. Write it, print it, or compare it with what is on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;
use tracing::{debug, info};

use crate::classifier::{classify, Classification};
use crate::config::Config;
use crate::emitter::{render, BuildDocument};
use crate::error::{GenError, GenResult};
use crate::scanner::{scan_dir, ExtensionFilter, FileFilter, FileSet};
use crate::writer::atomic_write;

/// What to do with the rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Replace the output file
    #[default]
    Write,
    /// Render only; nothing touches the disk
    DryRun,
    /// Compare with the existing output file
    Check,
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Output file replaced with new content
    Written,
    /// Output file rewritten with identical bytes
    Unchanged,
    /// Dry run, nothing written
    Rendered,
    /// Check mode: file on disk matches
    UpToDate,
    /// Check mode: file on disk is missing or differs
    Stale,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Written => "written",
            Status::Unchanged => "unchanged",
            Status::Rendered => "rendered",
            Status::UpToDate => "up-to-date",
            Status::Stale => "stale",
        }
    }

    /// Only a stale check counts as failure.
    pub fn is_success(&self) -> bool {
        !matches!(self, Status::Stale)
    }
}

/// Everything computed from the filesystem before anything is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub tests: FileSet,
    pub classification: Classification,
    pub document: BuildDocument,
}

/// Result of a generator run, consumed by the report renderers
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub project: String,
    pub status: Status,
    pub tests: Vec<String>,
    pub entry_point: Option<String>,
    pub common_sources: Vec<String>,
    pub document: BuildDocument,
    /// Unified diff against the existing file (check mode, stale only)
    pub diff: Option<String>,
}

/// Scans, classifies, renders and persists one build document.
pub struct Generator {
    config: Config,
    base_dir: PathBuf,
    filter: Box<dyn FileFilter>,
}

impl Generator {
    /// Generator rooted at the current directory, filtering by the
    /// configured extensions.
    pub fn new(config: Config) -> Self {
        let filter = ExtensionFilter::new(config.sources.extensions.iter().cloned());
        Self {
            config,
            base_dir: PathBuf::from("."),
            filter: Box::new(filter),
        }
    }

    /// Resolve the scanned directories and the output path against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Replace the extension filter.
    pub fn with_filter(mut self, filter: impl FileFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute-or-relative location of the output file
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.layout.output)
    }

    /// Scan and render without side effects.
    pub fn plan(&self) -> GenResult<Plan> {
        let layout = &self.config.layout;

        let sources = scan_dir(&self.base_dir.join(&layout.src_dir), self.filter.as_ref())?;
        let tests = scan_dir(&self.base_dir.join(&layout.test_dir), self.filter.as_ref())?;

        let classification = classify(&layout.src_dir, &sources, &self.config.sources.entry_point);
        let document = render(&self.config, &tests, &classification);

        Ok(Plan {
            tests,
            classification,
            document,
        })
    }

    /// Run the whole pipeline in the given mode.
    pub fn run(&self, mode: Mode) -> GenResult<GenerateReport> {
        let plan = self.plan()?;
        let output = self.output_path();
        let content = plan.document.render();

        let (status, diff) = match mode {
            Mode::DryRun => (Status::Rendered, None),
            Mode::Write => {
                // Previous content only decides the reported status.
                let previous = match read_existing(&output) {
                    Ok(previous) => previous,
                    Err(e) => {
                        debug!(error = %e, "previous output unreadable, treating as changed");
                        None
                    }
                };
                atomic_write(&output, content.as_bytes())?;
                if previous.as_deref() == Some(content.as_bytes()) {
                    (Status::Unchanged, None)
                } else {
                    (Status::Written, None)
                }
            }
            Mode::Check => match read_existing(&output)? {
                Some(existing) if existing == content.as_bytes() => (Status::UpToDate, None),
                existing => {
                    let old = existing
                        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                        .unwrap_or_default();
                    let label = self.config.layout.output.display().to_string();
                    (Status::Stale, Some(unified_diff(&label, &old, &content)))
                }
            },
        };

        info!(
            output = %output.display(),
            status = status.as_str(),
            tests = plan.tests.len(),
            "generation finished"
        );

        Ok(GenerateReport {
            output,
            project: self.config.project.name.clone(),
            status,
            tests: plan.tests.names().to_vec(),
            entry_point: plan.classification.entry_point,
            common_sources: plan.classification.common_sources,
            document: plan.document,
            diff,
        })
    }
}

fn read_existing(path: &Path) -> GenResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no existing output");
            Ok(None)
        }
        Err(source) => Err(GenError::ReadOutput {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Generate a unified diff between old and new content.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}

use std::path::PathBuf;

use clap::Parser;

use cmakegen::config::{Overrides, DEFAULT_CONFIG_FILE};
use cmakegen::Mode;

/// cmakegen - generate CMakeLists.txt from src/ and tests/
#[derive(Parser, Debug)]
#[command(name = "cmakegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to cmakegen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name used in project() and for the main executable
    #[arg(long)]
    pub project_name: Option<String>,

    /// Value for CMAKE_CXX_STANDARD
    #[arg(long)]
    pub cxx_standard: Option<u32>,

    /// Directory holding the program sources
    #[arg(long)]
    pub src_dir: Option<String>,

    /// Directory holding one source file per test
    #[arg(long)]
    pub test_dir: Option<String>,

    /// Directory passed to include_directories()
    #[arg(long)]
    pub include_dir: Option<String>,

    /// Where to write the build file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the document instead of writing it
    #[arg(long, conflicts_with = "check")]
    pub dry_run: bool,

    /// Exit non-zero if the output file is out of date
    #[arg(long)]
    pub check: bool,

    /// Output format for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Write
        }
    }

    /// Config path and whether the user asked for it explicitly
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            project_name: self.project_name.clone(),
            cxx_standard: self.cxx_standard,
            src_dir: self.src_dir.clone(),
            test_dir: self.test_dir.clone(),
            include_dir: self.include_dir.clone(),
            output: self.output.clone(),
        }
    }
}

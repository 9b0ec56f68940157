//! cmakegen - CMakeLists.txt generator
//!
//! Scans a sources directory and a tests directory and writes a
//! `CMakeLists.txt` with one executable + test registration per test file
//! and, when an entry point exists, one executable for the program itself.
//! Every target links all non-entry sources.

pub mod classifier;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod writer;

// Re-exports for convenience
pub use classifier::{classify, Classification};
pub use config::{Config, ConfigWarning, Overrides};
pub use emitter::{render, BuildDocument};
pub use error::{GenError, GenResult};
pub use generator::{GenerateReport, Generator, Mode, Status};
pub use scanner::{scan_dir, ExtensionFilter, FileFilter, FileSet};

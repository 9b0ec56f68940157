//! cmakegen CLI
//!
//! Usage: cmakegen [OPTIONS]
//!
//! Scans src/ and tests/ and writes CMakeLists.txt in the current directory.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;

use cmakegen::config;
use cmakegen::logging::{init_logging, LoggingConfig};
use cmakegen::report::{render_json, TextRenderer};
use cmakegen::Generator;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    let (config_path, explicit) = cli.config_path();
    let (config, _warnings) = config::resolve(
        &config_path,
        explicit,
        |key| std::env::var(key).ok(),
        &cli.overrides(),
    )
    .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    let generator = Generator::new(config);
    let output = generator.output_path();
    let report = generator
        .run(cli.mode())
        .with_context(|| format!("generating {}", output.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string(&render_json(&report))?);
    } else {
        let renderer = TextRenderer {
            unicode: std::io::stdout().is_terminal(),
        };
        print!("{}", renderer.render(&report));
    }

    if !report.status.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

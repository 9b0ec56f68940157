//! Report rendering
//!
//! Turns a `GenerateReport` into console output. Text output is meant for
//! people; JSON output is one object per run for scripts.

use serde_json::json;

use crate::generator::{GenerateReport, Status};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    bullet: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            bullet: "-",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            bullet: "-",
        }
    }
}

/// Text renderer for generator reports
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { unicode: true }
    }
}

impl TextRenderer {
    pub fn render(&self, report: &GenerateReport) -> String {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };
        let name = report
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.output.display().to_string());

        let mut out = String::new();
        match report.status {
            Status::Rendered => {
                out.push_str(&report.document.render());
                out.push('\n');
                return out;
            }
            Status::UpToDate => {
                out.push_str(&format!("{} {} is up to date\n", icons.check, name));
                return out;
            }
            Status::Stale => {
                out.push_str(&format!(
                    "{} {} is out of date, rerun cmakegen\n",
                    icons.cross, name
                ));
                if let Some(diff) = &report.diff {
                    out.push_str(diff);
                }
                return out;
            }
            Status::Written | Status::Unchanged => {}
        }

        let suffix = if report.status == Status::Unchanged {
            " (unchanged)"
        } else {
            ""
        };
        out.push_str(&format!(
            "{} Generated {} with {} tests{}:\n",
            icons.check,
            name,
            report.tests.len(),
            suffix
        ));
        for test in &report.tests {
            out.push_str(&format!("  {} {}\n", icons.bullet, test));
        }
        if report.entry_point.is_none() {
            out.push_str(&format!(
                "  (no entry point, {} target skipped)\n",
                report.project
            ));
        }
        out
    }
}

/// One JSON object describing the run
pub fn render_json(report: &GenerateReport) -> serde_json::Value {
    let mut value = json!({
        "event": "generate",
        "status": report.status.as_str(),
        "success": report.status.is_success(),
        "output": report.output.display().to_string(),
        "project": report.project,
        "tests": report.tests,
        "main": report.entry_point,
        "common_sources": report.common_sources,
        "hash": report.document.content_hash(),
    });
    if let (Some(diff), Some(obj)) = (&report.diff, value.as_object_mut()) {
        obj.insert("diff".to_string(), json!(diff));
    }
    value
}

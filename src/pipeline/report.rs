use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{FileOutcome, FileReport};

/// Per-file outcomes of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input file, in input order
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Wrap the per-file outcomes
    pub fn new(files: Vec<FileReport>) -> Self {
        Self { files }
    }

    /// Check if any file failed
    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| !f.is_ok())
    }

    /// Number of files processed
    pub fn processed_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_ok()).count()
    }

    /// Number of processed files that used at least one fallback
    pub fn fallback_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(&f.outcome, FileOutcome::Processed(s) if s.fallbacks > 0))
            .count()
    }

    /// Number of files that failed
    pub fn failure_count(&self) -> usize {
        self.files.len() - self.processed_count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("triax Batch Report").bold().cyan()));
            output.push_str(&format!("{}\n\n", style("==================").cyan()));

            for file in &self.files {
                let name = file.input.display().to_string();
                match &file.outcome {
                    FileOutcome::Processed(summary) if summary.fallbacks > 0 => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {} ({} fallbacks)\n",
                            WARN,
                            style(&name).yellow(),
                            style("WARNING").yellow().bold(),
                            summary.writer,
                            summary.fallbacks
                        ));
                    }
                    FileOutcome::Processed(summary) => {
                        output.push_str(&format!(
                            "[{}] {} - {}\n",
                            OK,
                            style(&name).green(),
                            summary.writer
                        ));
                    }
                    FileOutcome::Failed(e) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            FAIL,
                            style(&name).red(),
                            style("FAILED").red().bold(),
                            e
                        ));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} processed, {} with fallbacks, {} failed\n",
                style("Summary").bold(),
                style(self.processed_count()).green(),
                style(self.fallback_count()).yellow(),
                style(self.failure_count()).red()
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "triax Batch Report")?;
        writeln!(f, "==================")?;
        writeln!(f)?;

        for file in &self.files {
            let name = file.input.display();
            match &file.outcome {
                FileOutcome::Processed(summary) if summary.fallbacks > 0 => writeln!(
                    f,
                    "[⚠] {} - WARNING: {} ({} fallbacks)",
                    name, summary.writer, summary.fallbacks
                )?,
                FileOutcome::Processed(summary) => writeln!(f, "[✓] {} - {}", name, summary.writer)?,
                FileOutcome::Failed(e) => writeln!(f, "[✗] {} - FAILED: {}", name, e)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} processed, {} with fallbacks, {} failed",
            self.processed_count(),
            self.fallback_count(),
            self.failure_count()
        )
    }
}

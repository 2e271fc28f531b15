use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use log::{error, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{process_file, BatchReport, FileSummary, PipelineError, ProcessingConfig};

/// Outcome of one file in a batch
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was processed and written
    Processed(FileSummary),
    /// Processing failed; nothing was written for this file
    Failed(PipelineError),
}

/// One input file and what happened to it
#[derive(Debug)]
pub struct FileReport {
    /// Input path
    pub input: PathBuf,
    /// Result
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Whether the file was processed
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, FileOutcome::Processed(_))
    }
}

/// Process every file, isolating failures.
///
/// Errors and panics are caught at the file boundary, logged with the file
/// identity, and recorded in the returned report. With the `parallel` feature
/// files are fanned out across a rayon pool; each file remains sequential.
pub fn run_batch(inputs: &[PathBuf], output_dir: &Path, config: &ProcessingConfig) -> BatchReport {
    info!("Processing {} file(s) into {}", inputs.len(), output_dir.display());

    #[cfg(feature = "parallel")]
    let files: Vec<FileReport> = inputs
        .par_iter()
        .map(|input| process_isolated(input, output_dir, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let files: Vec<FileReport> = inputs
        .iter()
        .map(|input| process_isolated(input, output_dir, config))
        .collect();

    BatchReport::new(files)
}

fn process_isolated(input: &Path, output_dir: &Path, config: &ProcessingConfig) -> FileReport {
    let result = catch_unwind(AssertUnwindSafe(|| process_file(input, output_dir, config)))
        .unwrap_or_else(|payload| Err(PipelineError::Panicked(panic_message(payload.as_ref()))));

    let outcome = match result {
        Ok(summary) => FileOutcome::Processed(summary),
        Err(e) => {
            error!("{}: {}", input.display(), e);
            FileOutcome::Failed(e)
        }
    };

    FileReport {
        input: input.to_path_buf(),
        outcome,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload = catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = catch_unwind(|| panic!("{} {}", "formatted", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 1");

        let payload = catch_unwind(|| std::panic::panic_any(7_u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::error::panic_message;
use crate::output::RunProgress;
use crate::result::ToolboxResult;

/// Fans per-file units out and merges their partial results.
///
/// Each unit owns the partial it returns. Only the calling thread touches the
/// aggregate, merging partials in completion order.
pub struct Coordinator<'a> {
    workers: usize,
    action: &'static str,
    progress: &'a RunProgress,
}

impl<'a> Coordinator<'a> {
    /// `action` names the unit in failure messages ("lint", "format").
    #[must_use]
    pub fn new(workers: usize, action: &'static str, progress: &'a RunProgress) -> Self {
        Self {
            workers: workers.max(1),
            action,
            progress,
        }
    }

    /// Runs `unit` once per file. A single worker, or a single file, runs in place.
    pub fn run<F>(&self, files: &[PathBuf], unit: F) -> ToolboxResult
    where
        F: Fn(&Path) -> ToolboxResult + Sync,
    {
        let result = if self.workers > 1 && files.len() > 1 {
            self.run_parallel(files, &unit)
        } else {
            self.run_sequential(files, &unit)
        };
        self.progress.finish();
        result
    }

    fn run_sequential<F>(&self, files: &[PathBuf], unit: &F) -> ToolboxResult
    where
        F: Fn(&Path) -> ToolboxResult + Sync,
    {
        let mut aggregate = ToolboxResult::new();
        for file in files {
            aggregate.merge_with(self.isolate(file, unit));
            self.progress.inc();
        }
        aggregate
    }

    fn run_parallel<F>(&self, files: &[PathBuf], unit: &F) -> ToolboxResult
    where
        F: Fn(&Path) -> ToolboxResult + Sync,
    {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("Worker pool unavailable ({e}), processing sequentially");
                return self.run_sequential(files, unit);
            }
        };
        tracing::debug!("Processing {} files on {} workers", files.len(), self.workers);

        // Workers log through the caller's subscriber.
        let dispatch = tracing::dispatcher::get_default(Clone::clone);
        let (tx, rx) = mpsc::channel();
        let mut aggregate = ToolboxResult::new();
        pool.in_place_scope(|scope| {
            for file in files {
                let tx = tx.clone();
                let dispatch = dispatch.clone();
                scope.spawn(move |_| {
                    let partial =
                        tracing::dispatcher::with_default(&dispatch, || self.isolate(file, unit));
                    // The receiver outlives every sender.
                    let _ = tx.send(partial);
                });
            }
            drop(tx);
            for partial in rx {
                aggregate.merge_with(partial);
                self.progress.inc();
            }
        });
        aggregate
    }

    /// Converts a panicking unit into an error entry for its file.
    fn isolate<F>(&self, file: &Path, unit: &F) -> ToolboxResult
    where
        F: Fn(&Path) -> ToolboxResult + Sync,
    {
        catch_unwind(AssertUnwindSafe(|| unit(file))).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::warn!("Unit for {} panicked: {message}", file.display());
            let mut failed = ToolboxResult::new();
            failed.add_error(format!(
                "Failed to {} {}: {message}",
                self.action,
                file.display()
            ));
            failed
        })
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;

use std::path::Path;

use crate::error::Result;

/// Receives batch progress. Files are reported in merge order, which is the
/// sorted file order regardless of how many worker threads tallied them.
pub trait ProgressSink: Send + Sync {
    fn on_file(&self, path: &Path) -> Result<()>;
    fn on_complete(&self, files: usize) -> Result<()>;
}

/// Progress sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_file(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn on_complete(&self, _files: usize) -> Result<()> {
        Ok(())
    }
}

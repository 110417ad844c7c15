use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::{install, reset, save_parquet, take};

/// Scoped capture for one named run.
///
/// Creating it clears this thread's capture and installs the subscriber. Dropping it writes
/// every captured table to `{parent}/{run}/{target}.parquet` followed by an empty `_ready` file.
pub struct RunRecorder {
    dir: PathBuf,
    frames: Option<BTreeMap<String, DataFrame>>,
}

/// Keep run directory names to a safe character set.
fn dir_name(run: &str) -> String {
    run.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .take(60)
        .collect()
}

impl RunRecorder {
    pub fn new(parent: impl Into<PathBuf>, run: &str) -> Self {
        reset();
        install();
        Self {
            dir: parent.into().join(dir_name(run)),
            frames: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames captured so far. The first call drains the capture; later calls reuse it.
    /// Empty if any table fails to convert.
    pub fn frames(&mut self) -> &BTreeMap<String, DataFrame> {
        self.frames.get_or_insert_with(|| take().to_frames().unwrap_or_default())
    }
}

impl Drop for RunRecorder {
    fn drop(&mut self) {
        let mut frames = match self.frames.take() {
            Some(frames) => frames,
            None => take().to_frames().unwrap_or_default(),
        };
        if frames.is_empty() {
            return;
        }
        if let Err(e) = save_parquet(&mut frames, &self.dir) {
            eprintln!("RunRecorder: could not write {}: {e}", self.dir.display());
            return;
        }
        if let Err(e) = std::fs::File::create(self.dir.join("_ready")) {
            eprintln!("RunRecorder: could not mark {} ready: {e}", self.dir.display());
        }
    }
}

use std::path::PathBuf;

use icpc_cli::loader::{HeaderCheck, LoadOutcome};

#[derive(Debug)]
pub struct LoadResult {
    pub input: PathBuf,
    /// Written record file; `None` for dry runs.
    pub output: Option<PathBuf>,
    pub outcome: LoadOutcome,
}

impl LoadResult {
    pub fn has_errors(&self) -> bool {
        self.outcome.has_errors()
    }
}

#[derive(Debug)]
pub struct CheckResult {
    pub input: PathBuf,
    pub header: HeaderCheck,
}

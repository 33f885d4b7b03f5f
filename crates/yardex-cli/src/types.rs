use std::path::PathBuf;

/// A rule file that was skipped, with its rendered error.
#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug)]
pub struct ImportResult {
    pub output: PathBuf,
    pub files: usize,
    pub rulesets: usize,
    pub rules: usize,
    pub failures: Vec<FailedFile>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct ExportResult {
    pub rules: usize,
    pub failures: Vec<FailedFile>,
}

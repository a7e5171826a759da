use derive_builder::Builder;
use std::path::PathBuf;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_EXTENSION: &str = "log";

/// Settings for one batch run over a log directory.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    #[builder(default = "PathBuf::from(DEFAULT_LOG_DIR)")]
    pub log_dir: PathBuf,
    /// File name suffix (without the dot) that marks a log file.
    #[builder(default = "DEFAULT_EXTENSION.to_string()")]
    pub extension: String,
    /// Descend into subdirectories instead of listing the top level only.
    #[builder(default)]
    pub recursive: bool,
    /// Worker threads used across files. `1` processes files sequentially.
    #[builder(default = "1")]
    pub threads: usize,
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ext) = &self.extension
            && ext.trim_start_matches('.').is_empty()
        {
            return Err("extension must not be empty".to_string());
        }
        if self.threads == Some(0) {
            return Err("threads must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            recursive: false,
            threads: 1,
        }
    }
}

impl Config {
    /// Whether `file_name` carries the configured log suffix.
    ///
    /// The comparison is case-sensitive; a leading dot in `extension` is optional.
    #[must_use]
    pub fn is_log_file_name(&self, file_name: &str) -> bool {
        let ext = self.extension.trim_start_matches('.');
        file_name
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

use std::ffi::OsString;
use std::path::PathBuf;

use serde::Deserialize;

pub const OUTPUT_DIR_ENV: &str = "STARTUP_REPORT_DIR";

/// Where reports are written and how their files are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// `None` writes into the process working directory.
    pub output_dir: Option<PathBuf>,
    pub file_prefix: String,
    pub extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_prefix: "analysis-report-".to_string(),
            extension: "html".to_string(),
        }
    }
}

impl ReportConfig {
    /// Reads `STARTUP_REPORT_DIR`; an empty value means the working directory.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var_os(key))
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
        let output_dir = var(OUTPUT_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Self {
            output_dir,
            ..Self::default()
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn file_name(&self, test_name: &str) -> String {
        format!("{}{}.{}", self.file_prefix, test_name, self.extension)
    }

    pub fn report_path(&self, test_name: &str) -> PathBuf {
        let file_name = self.file_name(test_name);
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

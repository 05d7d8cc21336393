use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid test name: {0:?}")]
    InvalidTestName(String),

    #[error("Error during rendering analysis report for test {test_name}")]
    Render {
        test_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Error writing analysis report to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Listener error: {0}")]
    Listener(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;

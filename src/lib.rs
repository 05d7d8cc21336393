pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod report;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::ReportConfig;
pub use lifecycle::{ApplicationContext, ContextListener, Lookup};
pub use report::{ContextCustomizer, Customizers, ReportRenderer, ShutdownReportHook};
pub use types::{ContextEvent, ReportError, Result};

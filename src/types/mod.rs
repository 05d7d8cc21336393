pub mod error;
pub mod event;

pub use error::{ReportError, Result};
pub use event::ContextEvent;

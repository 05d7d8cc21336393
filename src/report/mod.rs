mod customizer;
mod hook;
mod renderer;

pub use customizer::{ContextCustomizer, Customizers};
pub use hook::{HookState, ShutdownReportHook};
pub use renderer::ReportRenderer;

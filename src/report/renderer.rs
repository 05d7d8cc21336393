/// Produces the body of the startup analysis report.
///
/// Registered in an [`ApplicationContext`] as `Arc<dyn ReportRenderer>`.
///
/// [`ApplicationContext`]: crate::lifecycle::ApplicationContext
pub trait ReportRenderer: Send + Sync {
    fn render(&self) -> anyhow::Result<String>;
}

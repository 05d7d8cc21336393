use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{ContextCustomizer, ReportRenderer};
use crate::config::ReportConfig;
use crate::lifecycle::{ApplicationContext, ContextListener, Lookup};
use crate::types::{ContextEvent, ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Constructed = 0,
    Attached = 1,
    Fired = 2,
    Done = 3,
}

impl HookState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Constructed,
            1 => Self::Attached,
            2 => Self::Fired,
            _ => Self::Done,
        }
    }
}

/// Writes the startup analysis report when the context it is attached to
/// closes.
///
/// The report body comes from the `dyn ReportRenderer` registered in the
/// context. A context without a renderer only gets a warning. Render and
/// write failures are returned from the close and fail it.
///
/// Clones share their state. All hooks compare equal regardless of test
/// name, so a [`Customizers`](super::Customizers) set holds at most one.
#[derive(Debug, Clone)]
pub struct ShutdownReportHook {
    test_name: String,
    config: ReportConfig,
    state: Arc<AtomicU8>,
}

impl ShutdownReportHook {
    /// Uses [`ReportConfig::default`], writing into the working directory.
    ///
    /// The environment is not consulted; hosts that honour
    /// `STARTUP_REPORT_DIR` pass [`ReportConfig::from_env`] to
    /// [`with_config`](Self::with_config).
    pub fn new(test_name: impl Into<String>) -> Result<Self> {
        Self::with_config(test_name, ReportConfig::default())
    }

    pub fn with_config(test_name: impl Into<String>, config: ReportConfig) -> Result<Self> {
        let test_name = test_name.into();
        validate_test_name(&test_name)?;
        Ok(Self {
            test_name,
            config,
            state: Arc::new(AtomicU8::new(HookState::Constructed as u8)),
        })
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn file_name(&self) -> String {
        self.config.file_name(&self.test_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.config.report_path(&self.test_name)
    }

    pub fn state(&self) -> HookState {
        HookState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Subscribes to `context`. Attaching twice registers two listeners.
    pub async fn attach(&self, context: &ApplicationContext) {
        context.add_listener(Arc::new(self.clone())).await;
        let _ = self.state.compare_exchange(
            HookState::Constructed as u8,
            HookState::Attached as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    fn set_state(&self, state: HookState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    async fn write_report(&self, context: &ApplicationContext) -> Result<()> {
        let renderer = match context.lookup::<dyn ReportRenderer>().await {
            Lookup::Found(renderer) => renderer,
            Lookup::Absent(cause) => {
                tracing::warn!(
                    test_name = %self.test_name,
                    context = context.id(),
                    %cause,
                    "Report for test not generated"
                );
                return Ok(());
            }
        };

        let report = match renderer.render() {
            Ok(report) => report,
            Err(source) => {
                tracing::error!(
                    test_name = %self.test_name,
                    context = context.id(),
                    error = ?source,
                    "Error during rendering analysis report"
                );
                return Err(ReportError::Render {
                    test_name: self.test_name.clone(),
                    source,
                });
            }
        };

        let path = self.report_path();
        if let Err(source) = tokio::fs::write(&path, report).await {
            tracing::error!(
                test_name = %self.test_name,
                context = context.id(),
                path = %path.display(),
                error = %source,
                "Error writing analysis report"
            );
            return Err(ReportError::Write { path, source });
        }

        let absolute = std::path::absolute(&path).unwrap_or(path);
        tracing::debug!(
            test_name = %self.test_name,
            context = context.id(),
            path = %absolute.display(),
            "Report saved"
        );
        Ok(())
    }
}

fn validate_test_name(name: &str) -> Result<()> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(ReportError::InvalidTestName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ContextListener for ShutdownReportHook {
    fn name(&self) -> &str {
        "shutdown_report"
    }

    async fn on_event(&self, context: &ApplicationContext, event: &ContextEvent) -> Result<()> {
        if !event.is_closed() {
            return Ok(());
        }

        self.set_state(HookState::Fired);
        let result = self.write_report(context).await;
        self.set_state(HookState::Done);
        result
    }
}

#[async_trait]
impl ContextCustomizer for ShutdownReportHook {
    async fn customize(&self, context: &ApplicationContext) {
        self.attach(context).await;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PartialEq for ShutdownReportHook {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ShutdownReportHook {}

impl Hash for ShutdownReportHook {
    fn hash<H: Hasher>(&self, state: &mut H) {
        TypeId::of::<Self>().hash(state);
    }
}

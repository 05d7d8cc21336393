use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use crate::report::ReportRenderer;

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    /// Message and every field, rendered as `name=value` pairs.
    pub fields: String,
}

/// Collects tracing events emitted on the current thread while its guard is alive.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    /// Captures events for the current thread until the guard is dropped.
    ///
    /// `#[tokio::test]` runs on a current-thread runtime, so events from
    /// awaited code land here too.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            events: capture.events.clone(),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events at `level` emitted from targets under `target_prefix`.
    pub fn at(&self, level: Level, target_prefix: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level && e.target.starts_with(target_prefix))
            .collect()
    }

    pub fn count_from(&self, target_prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| e.target.starts_with(target_prefix))
            .count()
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0,
        });
    }
}

#[derive(Default)]
struct FieldCollector(String);

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        let _ = write!(self.0, "{}={} ", field.name(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

pub struct StaticRenderer(pub String);

impl StaticRenderer {
    pub fn new(body: &str) -> Self {
        Self(body.to_string())
    }
}

impl ReportRenderer for StaticRenderer {
    fn render(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

pub struct FailingRenderer;

impl ReportRenderer for FailingRenderer {
    fn render(&self) -> anyhow::Result<String> {
        anyhow::bail!("startup events were not recorded")
    }
}

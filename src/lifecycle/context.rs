use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use super::{ContextListener, ContextPhase};
use crate::types::{ContextEvent, Result};

/// Returned by [`ApplicationContext::lookup`] when nothing is registered for
/// the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoSuchComponent {
    pub type_name: &'static str,
}

impl std::fmt::Display for NoSuchComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No component of type {} registered", self.type_name)
    }
}

#[derive(Debug)]
pub enum Lookup<T: ?Sized> {
    Found(Arc<T>),
    Absent(NoSuchComponent),
}

/// Component registry and lifecycle event source for a single test run.
///
/// Components are singletons keyed by type; trait objects are registered
/// under the trait object type itself, e.g. `Arc<dyn ReportRenderer>`.
pub struct ApplicationContext {
    id: String,
    components: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
    listeners: RwLock<Vec<Arc<dyn ContextListener>>>,
    closed: AtomicBool,
    phase_tx: watch::Sender<ContextPhase>,
    phase_rx: watch::Receiver<ContextPhase>,
}

impl ApplicationContext {
    pub fn new(id: impl Into<String>) -> Self {
        let (phase_tx, phase_rx) = watch::channel(ContextPhase::Active);
        Self {
            id: id.into(),
            components: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
            closed: AtomicBool::new(false),
            phase_tx,
            phase_rx,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn register<T>(&self, component: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut components = self.components.write().await;
        tracing::info!(
            context = %self.id,
            component = std::any::type_name::<T>(),
            "Registering component"
        );
        components.insert(TypeId::of::<T>(), Box::new(component));
    }

    pub async fn lookup<T>(&self) -> Lookup<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let components = self.components.read().await;
        match components
            .get(&TypeId::of::<T>())
            .and_then(|c| c.downcast_ref::<Arc<T>>())
        {
            Some(component) => Lookup::Found(component.clone()),
            None => Lookup::Absent(NoSuchComponent {
                type_name: std::any::type_name::<T>(),
            }),
        }
    }

    pub async fn component_count(&self) -> usize {
        self.components.read().await.len()
    }

    pub async fn add_listener(&self, listener: Arc<dyn ContextListener>) {
        tracing::trace!(context = %self.id, listener = listener.name(), "Adding listener");
        self.listeners.write().await.push(listener);
    }

    pub async fn listener_count(&self) -> usize {
        self.listeners.read().await.len()
    }

    /// Delivers `event` to every listener in registration order.
    ///
    /// Delivery stops at the first listener that fails and its error is
    /// returned.
    pub async fn publish(&self, event: &ContextEvent) -> Result<()> {
        // Snapshot so listeners may add listeners without deadlocking.
        let listeners = self.listeners.read().await.clone();
        tracing::trace!(
            context = %self.id,
            %event,
            listeners = listeners.len(),
            "Publishing event"
        );
        for listener in &listeners {
            listener.on_event(self, event).await?;
        }
        Ok(())
    }

    pub fn phase(&self) -> ContextPhase {
        *self.phase_rx.borrow()
    }

    pub fn phase_receiver(&self) -> watch::Receiver<ContextPhase> {
        self.phase_rx.clone()
    }

    /// Publishes [`ContextEvent::Closed`] once. Later calls are no-ops.
    ///
    /// The context ends up [`ContextPhase::Closed`] even if a listener fails.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let _ = self.phase_tx.send(ContextPhase::Closing);
        tracing::info!(context = %self.id, "Closing context");

        let result = self.publish(&ContextEvent::Closed).await;

        let _ = self.phase_tx.send(ContextPhase::Closed);
        tracing::info!(context = %self.id, ok = result.is_ok(), "Context closed");

        result
    }
}

impl Default for ApplicationContext {
    fn default() -> Self {
        Self::new("application")
    }
}

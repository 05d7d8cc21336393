use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::lifecycle::ApplicationContext;

/// Prepares a context before a test runs against it.
#[async_trait]
pub trait ContextCustomizer: Send + Sync {
    async fn customize(&self, context: &ApplicationContext);

    fn as_any(&self) -> &dyn Any;
}

/// Customizers are equal when they are the same concrete type.
impl PartialEq for dyn ContextCustomizer {
    fn eq(&self, other: &Self) -> bool {
        self.as_any().type_id() == other.as_any().type_id()
    }
}

/// Holds at most one customizer per concrete type; the first one wins.
#[derive(Default)]
pub struct Customizers {
    customizers: Vec<Arc<dyn ContextCustomizer>>,
}

impl Customizers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a customizer of the same type is already present.
    pub fn insert(&mut self, customizer: Arc<dyn ContextCustomizer>) -> bool {
        if self.customizers.iter().any(|c| **c == *customizer) {
            tracing::trace!("Skipping duplicate context customizer");
            return false;
        }
        self.customizers.push(customizer);
        true
    }

    pub fn len(&self) -> usize {
        self.customizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customizers.is_empty()
    }

    pub async fn apply(&self, context: &ApplicationContext) {
        for customizer in &self.customizers {
            customizer.customize(context).await;
        }
    }
}

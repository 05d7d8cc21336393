use async_trait::async_trait;

use super::ApplicationContext;
use crate::types::{ContextEvent, Result};

/// Receives every lifecycle event published by the context it was added to.
///
/// Listeners are handed the publishing context on each call instead of
/// holding a reference to it, so a listener never keeps its context alive.
#[async_trait]
pub trait ContextListener: Send + Sync {
    fn name(&self) -> &str {
        "anonymous"
    }

    async fn on_event(&self, context: &ApplicationContext, event: &ContextEvent) -> Result<()>;
}

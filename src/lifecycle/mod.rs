mod context;
mod listener;
mod phase;

pub use context::{ApplicationContext, Lookup, NoSuchComponent};
pub use listener::ContextListener;
pub use phase::ContextPhase;

/// Lifecycle notifications emitted by an [`ApplicationContext`].
///
/// [`ApplicationContext`]: crate::lifecycle::ApplicationContext
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent {
    Refreshed,
    Started,
    Stopped,
    Closed,
}

impl ContextEvent {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for ContextEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refreshed => write!(f, "refreshed"),
            Self::Started => write!(f, "started"),
            Self::Stopped => write!(f, "stopped"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextPhase {
    #[default]
    Active,
    Closing,
    Closed,
}

use crate::notify::surface::Delivery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ring the terminal bell.
    PlaySound,
    /// Show the unseen-highlight marker in the status bar.
    MarkAlerted,
    /// Recompute the terminal title from the highlight counters.
    RefreshTitle,
    /// Hand a desktop notification to the notifier.
    Notify(Delivery),
    Quit,
}

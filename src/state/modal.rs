//! Modal dialog state for the UI.

/// Overlay drawn above the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    /// No overlay; input goes to the dashboard.
    #[default]
    None,
    /// Informational alert; any key dismisses it.
    Alert {
        /// Text shown in the alert box.
        message: String,
    },
    /// Key binding reference.
    Help,
}

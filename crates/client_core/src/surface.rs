/// Rendering surface the controller drives. The frontend owns the concrete
/// widgets (form controls, loading indicator, result region); the controller
/// is their sole mutator during a query cycle.
///
/// Contract:
/// - `set_busy(true)` disables the input and submit controls and switches the
///   action label to its in-progress text; `set_busy(false)` restores both.
/// - `show_loading` reveals the loading indicator and clears the result
///   region.
/// - `show_success`/`show_error` hide the indicator and write the result
///   region's text with success or error styling.
pub trait QuerySurface: Send + Sync {
    fn set_busy(&self, busy: bool);
    fn show_loading(&self);
    fn show_success(&self, message: &str);
    fn show_error(&self, message: &str);
}

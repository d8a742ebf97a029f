//! Busy indicator shown while a request is in flight.

use eframe::egui;
use shared::domain::RequestState;

pub fn is_visible(state: RequestState) -> bool {
    state.is_pending()
}

/// Draws a spinner when `state` is pending. Returns whether anything was drawn.
pub fn show(ui: &mut egui::Ui, state: RequestState) -> bool {
    if !is_visible(state) {
        return false;
    }
    ui.add(egui::Spinner::new().size(28.0));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_only_while_pending() {
        assert!(is_visible(RequestState::Pending));
        assert!(!is_visible(RequestState::Idle));
        assert!(!is_visible(RequestState::Succeeded));
        assert!(!is_visible(RequestState::Failed));
    }
}

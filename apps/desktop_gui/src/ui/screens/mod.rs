//! One module per screen, plus the pieces the question screens share.

pub mod chat;
pub mod insights;
pub mod table_qa;
pub mod upload;

use crossbeam_channel::Sender;
use eframe::egui;
use shared::domain::RequestState;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::{Screen, WorkspaceState};
use crate::ui::theme::{self, PALETTE};
use crate::ui::widgets::pending_indicator;

pub fn show(ui: &mut egui::Ui, workspace: &mut WorkspaceState, cmd_tx: &Sender<BackendCommand>) {
    match workspace.active {
        Screen::Chat => chat::show(ui, workspace, cmd_tx),
        Screen::Upload => upload::show(ui, workspace, cmd_tx),
        Screen::Insights => insights::show(ui, workspace, cmd_tx),
        Screen::TableQa => table_qa::show(ui, workspace, cmd_tx),
    }
}

pub struct QuestionRow<'a> {
    pub id: &'static str,
    pub hint: &'static str,
    pub busy_label: &'static str,
    pub pending: bool,
    pub can_submit: bool,
    pub input: &'a mut String,
}

/// Text field plus submit button. Returns `true` when the user submitted,
/// either by clicking or by pressing Enter in the field.
pub fn question_row(ui: &mut egui::Ui, row: QuestionRow<'_>) -> bool {
    ui.horizontal(|ui| {
        let button_width = 130.0;
        let edit = egui::TextEdit::singleline(row.input)
            .id_salt(row.id)
            .hint_text(row.hint)
            .desired_width((ui.available_width() - button_width).max(120.0));
        let response = ui.add(edit);
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let label = if row.pending { row.busy_label } else { "Submit" };
        let clicked = ui
            .add_enabled(!row.pending, theme::primary_button(label, PALETTE.accent))
            .clicked();
        (clicked || entered) && row.can_submit
    })
    .inner
}

/// Spinner while pending, otherwise the latest result text.
pub fn result_box(ui: &mut egui::Ui, state: RequestState, text: &str) {
    theme::response_frame().show(ui, |ui| {
        ui.set_min_size(egui::vec2(ui.available_width(), theme::RESPONSE_MIN_HEIGHT));
        if pending_indicator::show(ui, state) {
            return;
        }
        egui::ScrollArea::vertical()
            .max_height(360.0)
            .show(ui, |ui| {
                ui.add(egui::Label::new(text).wrap());
            });
        if state == RequestState::Succeeded && ui.small_button("Copy").clicked() {
            ui.ctx().copy_text(text.to_string());
        }
    });
}

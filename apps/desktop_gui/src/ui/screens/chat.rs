use crossbeam_channel::Sender;
use eframe::egui;

use super::{question_row, result_box, QuestionRow};
use crate::backend_bridge::commands::{BackendCommand, UploadSlot};
use crate::controller::reducer::WorkspaceState;
use crate::ui::widgets::upload_panel::{self, UploadPresentation};

pub fn show(ui: &mut egui::Ui, workspace: &mut WorkspaceState, cmd_tx: &Sender<BackendCommand>) {
    ui.heading("📊 Financial Document Q&A Assistant 🗨️");
    ui.add_space(12.0);

    let submitted = question_row(
        ui,
        QuestionRow {
            id: "chat_question",
            hint: "Ask a question about your document...",
            busy_label: "Thinking...",
            pending: workspace.chat.is_pending(),
            can_submit: workspace.chat.can_submit(),
            input: workspace.chat.input_mut(),
        },
    );
    if submitted {
        workspace.submit_chat(cmd_tx);
    }

    ui.add_space(12.0);
    result_box(ui, workspace.chat.state(), workspace.chat.result_text());

    ui.add_space(16.0);
    egui::CollapsingHeader::new("Add a document")
        .id_salt("chat_upload")
        .show(ui, |ui| {
            if upload_panel::show(ui, &mut workspace.chat_upload, UploadPresentation::Compact) {
                workspace.submit_upload(UploadSlot::ChatSidebar, cmd_tx);
            }
        });
}

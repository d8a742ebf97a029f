use crossbeam_channel::Sender;
use eframe::egui;

use super::{question_row, result_box, QuestionRow};
use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::WorkspaceState;
use crate::ui::theme::PALETTE;

pub fn show(ui: &mut egui::Ui, workspace: &mut WorkspaceState, cmd_tx: &Sender<BackendCommand>) {
    ui.heading("🧮 Ask About a Table");
    ui.add_space(12.0);

    let pending = workspace.table_qa.is_pending();
    ui.add_enabled_ui(!pending, |ui| {
        ui.horizontal(|ui| {
            ui.label("File on server:");
            ui.add(
                egui::TextEdit::singleline(&mut workspace.table_qa.input_mut().file_path)
                    .id_salt("table_file_path")
                    .hint_text("./uploads/balance_sheet.csv")
                    .desired_width(f32::INFINITY),
            );
        });
        if let Some(path) = workspace.last_uploaded_path.clone() {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Last upload: {path}")).color(PALETTE.muted_text),
                );
                if ui.small_button("Use").clicked() {
                    workspace.table_qa.input_mut().file_path = path;
                }
            });
        }
    });

    let can_submit = workspace.table_qa.can_submit();
    let submitted = question_row(
        ui,
        QuestionRow {
            id: "table_question",
            hint: "Ask a question about this table...",
            busy_label: "Thinking...",
            pending,
            can_submit,
            input: &mut workspace.table_qa.input_mut().question,
        },
    );
    if submitted {
        workspace.submit_table_qa(cmd_tx);
    }

    ui.add_space(12.0);
    result_box(ui, workspace.table_qa.state(), workspace.table_qa.result_text());
}

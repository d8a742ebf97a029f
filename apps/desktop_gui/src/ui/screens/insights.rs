use crossbeam_channel::Sender;
use eframe::egui;

use super::{question_row, result_box, QuestionRow};
use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::WorkspaceState;

pub fn show(ui: &mut egui::Ui, workspace: &mut WorkspaceState, cmd_tx: &Sender<BackendCommand>) {
    ui.heading("📈 Generate Financial Insights 🧠");
    ui.add_space(12.0);

    let submitted = question_row(
        ui,
        QuestionRow {
            id: "insights_question",
            hint: "Ask for insights...",
            busy_label: "Generating...",
            pending: workspace.insights.is_pending(),
            can_submit: workspace.insights.can_submit(),
            input: workspace.insights.input_mut(),
        },
    );
    if submitted {
        workspace.submit_insights(cmd_tx);
    }

    ui.add_space(12.0);
    result_box(ui, workspace.insights.state(), workspace.insights.result_text());
}

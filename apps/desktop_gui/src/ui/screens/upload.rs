use crossbeam_channel::Sender;
use eframe::egui;

use crate::backend_bridge::commands::{BackendCommand, UploadSlot};
use crate::controller::reducer::WorkspaceState;
use crate::ui::widgets::upload_panel::{self, UploadPresentation};

pub fn show(ui: &mut egui::Ui, workspace: &mut WorkspaceState, cmd_tx: &Sender<BackendCommand>) {
    ui.heading("📤 Upload Financial Document");
    ui.add_space(12.0);

    if upload_panel::show(ui, &mut workspace.upload, UploadPresentation::FullScreen) {
        workspace.submit_upload(UploadSlot::UploadScreen, cmd_tx);
    }
}

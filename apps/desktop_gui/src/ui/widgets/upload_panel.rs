//! Upload form shared by the chat sidebar and the upload screen.

use std::path::Path;

use client_core::UploadController;
use eframe::egui;

use crate::ui::theme::{self, PALETTE};
use crate::ui::widgets::pending_indicator;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "htm", "html", "csv", "xlsx", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPresentation {
    Compact,
    FullScreen,
}

/// Draws the form. Returns `true` when the user asked to upload.
pub fn show(
    ui: &mut egui::Ui,
    controller: &mut UploadController,
    presentation: UploadPresentation,
) -> bool {
    let pending = controller.is_pending();

    ui.add_enabled_ui(!pending, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Choose file…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Documents", DOCUMENT_EXTENSIONS)
                    .pick_file()
                {
                    tracing::debug!(path = %path.display(), "document selected");
                    controller.set_input(Some(path));
                }
            }
            match controller.input() {
                Some(path) if presentation == UploadPresentation::Compact => {
                    ui.label(display_name(path));
                }
                Some(_) => {}
                None => {
                    ui.label(egui::RichText::new("No file chosen").color(PALETTE.muted_text));
                }
            }
        });
    });

    if presentation == UploadPresentation::FullScreen {
        if let Some(path) = controller.input() {
            ui.label(
                egui::RichText::new(format!("Selected: {}", display_name(path)))
                    .color(PALETTE.muted_text),
            );
        }
    }

    let label = if pending { "Uploading..." } else { "Upload" };
    let button = match presentation {
        UploadPresentation::Compact => egui::Button::new(label),
        UploadPresentation::FullScreen => theme::primary_button(label, PALETTE.upload_accent),
    };
    let requested = ui.add_enabled(controller.can_submit(), button).clicked();

    let status = |ui: &mut egui::Ui| {
        if !pending_indicator::show(ui, controller.state()) && !controller.result_text().is_empty()
        {
            ui.label(controller.result_text());
        }
    };
    match presentation {
        UploadPresentation::Compact => status(ui),
        UploadPresentation::FullScreen => {
            ui.add_space(8.0);
            theme::response_frame().show(ui, status);
        }
    }

    requested
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(&PathBuf::from("/docs/q3/report.pdf")), "report.pdf");
        assert_eq!(display_name(&PathBuf::from("/")), "/");
    }
}

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{apply_ui_event, ApiHealth, Screen, WorkspaceState};
use crate::ui::screens;
use crate::ui::theme::{self, PALETTE};

pub struct FinqaApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    workspace: WorkspaceState,
    theme_applied: bool,
}

impl FinqaApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        if let Err(err) = dispatch_backend_command(&cmd_tx, BackendCommand::ProbeHealth) {
            tracing::warn!("could not queue startup health probe: {err}");
        }
        Self {
            cmd_tx,
            ui_rx,
            workspace: WorkspaceState::new(),
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.workspace, event);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_nav")
            .frame(
                egui::Frame::NONE
                    .fill(PALETTE.nav_fill)
                    .inner_margin(egui::Margin::symmetric(24, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut target = self.workspace.active;
                    for screen in Screen::ALL {
                        ui.selectable_value(
                            &mut target,
                            screen,
                            egui::RichText::new(screen.label()).strong().size(16.0),
                        );
                        ui.add_space(16.0);
                    }
                    self.workspace.navigate(target);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (text, color) = match &self.workspace.api_health {
                            ApiHealth::Unknown => ("API: checking…", PALETTE.muted_text),
                            ApiHealth::Online(_) => ("API online", PALETTE.upload_accent),
                            ApiHealth::Unreachable(_) => {
                                ("API unreachable", PALETTE.banner_stroke)
                            }
                        };
                        let label = ui.label(egui::RichText::new(text).color(color));
                        match &self.workspace.api_health {
                            ApiHealth::Online(message) | ApiHealth::Unreachable(message) => {
                                label.on_hover_text(message.as_str());
                            }
                            ApiHealth::Unknown => {}
                        }
                        if ui.small_button("↻").on_hover_text("Check again").clicked() {
                            self.workspace.api_health = ApiHealth::Unknown;
                            if let Err(err) =
                                dispatch_backend_command(&self.cmd_tx, BackendCommand::ProbeHealth)
                            {
                                self.workspace.api_health = ApiHealth::Unreachable(err.to_string());
                            }
                        }
                    });
                });
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.workspace.status).weak());
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.workspace.banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(PALETTE.banner_fill)
            .stroke(egui::Stroke::new(1.0, PALETTE.banner_stroke))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", banner.message(), banner.guidance()))
                            .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.workspace.banner = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }
}

impl eframe::App for FinqaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                self.show_status_banner(ui);
                screens::show(ui, &mut self.workspace, &self.cmd_tx);
            });
        });

        // Results arrive from the worker thread; keep polling while anything is in flight.
        if self.workspace.any_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::protocol::InsightsResponse;

    use super::*;

    #[test]
    fn startup_queues_a_health_probe() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (_ui_tx, ui_rx) = bounded(4);
        let _app = FinqaApp::new(cmd_tx, ui_rx);
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::ProbeHealth)));
    }

    #[test]
    fn drains_worker_events_into_workspace() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let mut app = FinqaApp::new(cmd_tx, ui_rx);
        let _ = cmd_rx.try_recv();

        app.workspace.navigate(Screen::Insights);
        app.workspace.insights.set_input("margins?".to_string());
        app.workspace.submit_insights(&app.cmd_tx);
        let Ok(BackendCommand::GenerateInsights { sequence, .. }) = cmd_rx.try_recv() else {
            panic!("expected an insights command");
        };

        ui_tx
            .send(UiEvent::Info("Backend worker ready".to_string()))
            .expect("info");
        ui_tx
            .send(UiEvent::InsightsReady {
                sequence,
                outcome: Ok(InsightsResponse {
                    question: None,
                    insights: Some("grew 5%".to_string()),
                }),
            })
            .expect("insights");
        app.process_ui_events();

        assert_eq!(app.workspace.status, "Backend worker ready");
        assert_eq!(app.workspace.insights.result_text(), "grew 5%");
        assert!(!app.workspace.any_pending());
    }
}

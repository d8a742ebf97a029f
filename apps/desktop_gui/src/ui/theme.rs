//! Light palette and spacing for the whole app.

use eframe::egui;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub nav_fill: egui::Color32,
    pub text: egui::Color32,
    pub muted_text: egui::Color32,
    pub accent: egui::Color32,
    pub upload_accent: egui::Color32,
    pub response_fill: egui::Color32,
    pub response_stroke: egui::Color32,
    pub banner_fill: egui::Color32,
    pub banner_stroke: egui::Color32,
}

pub const PALETTE: Palette = Palette {
    nav_fill: egui::Color32::from_rgb(0xf9, 0xf9, 0xf9),
    text: egui::Color32::from_rgb(0x33, 0x33, 0x33),
    muted_text: egui::Color32::from_rgb(0x55, 0x55, 0x55),
    accent: egui::Color32::from_rgb(0x00, 0x70, 0xf3),
    upload_accent: egui::Color32::from_rgb(0x28, 0xa7, 0x45),
    response_fill: egui::Color32::from_rgb(0xfa, 0xfa, 0xfa),
    response_stroke: egui::Color32::from_rgb(0xdd, 0xdd, 0xdd),
    banner_fill: egui::Color32::from_rgb(111, 53, 53),
    banner_stroke: egui::Color32::from_rgb(175, 96, 96),
};

/// Widest column the screens lay their content out in.
pub const CONTENT_MAX_WIDTH: f32 = 800.0;
pub const RESPONSE_MIN_HEIGHT: f32 = 100.0;

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.override_text_color = Some(PALETTE.text);
    style.visuals.selection.bg_fill = PALETTE.accent;
    style.visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.interact_size = egui::vec2(40.0, 30.0);
    ctx.set_style(style);
}

pub fn primary_button(label: &str, fill: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(label.to_string())
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(fill)
    .min_size(egui::vec2(120.0, 34.0))
}

/// Bordered box holding the latest result or the pending indicator.
pub fn response_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(PALETTE.response_fill)
        .stroke(egui::Stroke::new(1.0, PALETTE.response_stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
}

use eframe::egui;

use super::theme::Theme;

const CAPTION_MAX_WIDTH: f32 = 640.0;

pub struct CaptionPanel;

impl CaptionPanel {
    pub fn show(ctx: &egui::Context, theme: &Theme, caption: &str) {
        egui::TopBottomPanel::bottom("caption_panel")
            .resizable(false)
            .show_separator_line(false)
            .min_height(120.0)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CAPTION_MAX_WIDTH);
                    ui.add(
                        egui::Label::new(theme.caption(ctx, caption).size(20.0).strong()).wrap(),
                    );
                });
                ui.add_space(12.0);
            });
    }
}

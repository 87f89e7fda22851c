//! Blocking notice shown for failed actions

use eframe::egui;

/// Show `notice` as a modal until dismissed
pub fn show(ctx: &egui::Context, notice: &mut Option<String>) {
    let Some(message) = notice.as_deref() else {
        return;
    };

    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
        ui.set_min_width(240.0);
        ui.label(message);
        ui.add_space(8.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });

    if dismissed || modal.should_close() {
        *notice = None;
    }
}

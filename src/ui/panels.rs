use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – region filter
// ---------------------------------------------------------------------------

/// Render the left filter panel: one checkbox per state (UF).
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let ctx = std::sync::Arc::clone(&state.context);
    let codes = &ctx.dataset.region_codes;

    ui.strong(format!("UF  ({}/{})", state.selection.len(), codes.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    if let Some(notice) = state.filter_notice {
        ui.label(RichText::new(notice).color(Color32::YELLOW));
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // Toggles are applied after the loop so the selection is not
            // mutated while it is being displayed.
            let mut toggled: Option<&str> = None;
            for code in codes {
                let mut checked = state.selection.contains(code);
                let text = RichText::new(code).color(state.color_map.color_for(code));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(code.as_str());
                }
            }
            if let Some(code) = toggled {
                state.toggle_region(code);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the summary bar: what was loaded and what is visible.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    let ctx = &state.context;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} municipalities loaded, {} visible",
            ctx.dataset.len(),
            state.visible_indices.len()
        ));

        ui.separator();
        ui.label(format!(
            "Data: {}  ·  Model: {}",
            ctx.config.data_path.display(),
            ctx.config.model_path.display()
        ));

        if ctx.dataset.dropped_rows > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{} row(s) with missing values skipped",
                    ctx.dataset.dropped_rows
                ))
                .color(Color32::YELLOW),
            );
        }
    });
}

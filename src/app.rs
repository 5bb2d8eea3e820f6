use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};

use crate::context::DashboardContext;
use crate::error::LoadError;
use crate::state::AppState;
use crate::ui::{panels, plot, simulation, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// The dashboard window: either a ready session or the startup failure.
pub enum DashboardApp {
    Ready(AppState),
    Failed(LoadError),
}

impl DashboardApp {
    pub fn new(loaded: Result<DashboardContext, LoadError>) -> Self {
        match loaded {
            Ok(ctx) => DashboardApp::Ready(AppState::new(Arc::new(ctx))),
            Err(e) => DashboardApp::Failed(e),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match self {
            DashboardApp::Ready(state) => state,
            DashboardApp::Failed(err) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Brazilian Business Demography");
                    ui.separator();
                    ui.label(RichText::new(err.to_string()).color(Color32::RED).strong());
                });
                return;
            }
        };

        // ---- Top panel: summary bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: region filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: table, analyses, simulation ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Brazilian Business Demography");
                    ui.add_space(8.0);

                    if state.visible_indices.is_empty() {
                        ui.colored_label(
                            Color32::YELLOW,
                            "No data available for the selected filters.",
                        );
                    } else {
                        ui.strong("Dataset (sample)");
                        tables::data_table(ui, state);
                        ui.add_space(12.0);

                        ui.strong("Analyses");
                        ui.columns(2, |cols| {
                            plot::scatter_plot(&mut cols[0], state);
                            tables::ranking_table(&mut cols[1], state);
                        });
                    }

                    ui.add_space(12.0);
                    ui.separator();
                    simulation::simulation_form(ui, state);
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn failed_startup_has_no_session() {
        let config = AppConfig {
            data_path: PathBuf::from("/nonexistent/df_final.csv"),
            model_path: PathBuf::from("/nonexistent/model.json"),
        };
        let app = DashboardApp::new(DashboardContext::load(&config));
        assert!(matches!(app, DashboardApp::Failed(LoadError::DataLoad { .. })));
    }
}

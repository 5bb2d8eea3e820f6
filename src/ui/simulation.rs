use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::predict::SimulationOutcome;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scenario simulation form
// ---------------------------------------------------------------------------

/// GDP and population inputs, a "Predict" button and the last outcome.
pub fn simulation_form(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Scenario simulation");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Total GDP (R$)");
        ui.add(
            egui::DragValue::new(&mut state.sim_gdp)
                .range(0.0..=f64::MAX)
                .speed(1_000_000.0)
                .max_decimals(2),
        );

        ui.add_space(16.0);
        ui.label("Population");
        ui.add(
            egui::DragValue::new(&mut state.sim_population)
                .range(0.0..=f64::MAX)
                .speed(1_000.0)
                .max_decimals(0),
        );

        ui.add_space(16.0);
        if ui.button("Predict").clicked() {
            state.run_simulation();
        }
    });

    let Some(outcome) = &state.sim_outcome else {
        return;
    };
    let (text, color) = match outcome {
        SimulationOutcome::Estimate { estimate, .. } => (
            format!("Estimated number of businesses: {estimate}"),
            Color32::LIGHT_GREEN,
        ),
        SimulationOutcome::Invalid(msg) => (msg.clone(), Color32::YELLOW),
        SimulationOutcome::Failed(msg) => (msg.clone(), Color32::RED),
    };
    ui.add_space(4.0);
    ui.label(RichText::new(text).color(color));
}

use std::collections::BTreeMap;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// GDP × business count scatter with the fitted regression line
// ---------------------------------------------------------------------------

/// Render the scatter plot of visible municipalities plus the fit line.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    ui.label(RichText::new("Total GDP × Active businesses").strong());

    let dataset = &state.context.dataset;

    // One series per region so the legend doubles as a colour key.
    let mut by_region: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in state.visible_indices.iter().filter_map(|&i| dataset.records.get(i)) {
        by_region
            .entry(rec.region_code.as_str())
            .or_default()
            .push([rec.gdp_total, rec.business_count as f64]);
    }

    if let Some(warning) = &state.fit_warning {
        ui.colored_label(Color32::YELLOW, warning.as_str());
    }

    Plot::new("gdp_scatter")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Total GDP")
        .y_axis_label("Active businesses")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (code, points) in by_region {
                let series = Points::new(PlotPoints::from(points))
                    .name(code)
                    .color(state.color_map.color_for(code))
                    .radius(2.5);
                plot_ui.points(series);
            }

            if let Some(line) = &state.fit_line {
                let points: PlotPoints = line.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name("Linear regression")
                        .color(Color32::WHITE)
                        .width(2.0),
                );
            }
        });
}

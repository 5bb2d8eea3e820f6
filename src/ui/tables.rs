use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{
    COL_BUSINESS_COUNT, COL_GDP_TOTAL, COL_POPULATION, COL_REGION_CODE, COL_REGION_NAME,
};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

/// Every visible record with the five required columns.  Rows are
/// virtualised, so large datasets scroll without cost.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let dataset = &state.context.dataset;
    let rows = &state.visible_indices;

    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(TABLE_HEIGHT)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto())
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for name in [COL_REGION_NAME, COL_REGION_CODE, COL_BUSINESS_COUNT, COL_GDP_TOTAL, COL_POPULATION] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let rec = &dataset.records[rows[row.index()]];
                    row.col(|ui| {
                        ui.label(rec.region_name.as_str());
                    });
                    row.col(|ui| {
                        ui.label(rec.region_code.as_str());
                    });
                    row.col(|ui| {
                        ui.label(rec.business_count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", rec.gdp_total));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", rec.population));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Top-10 ranking
// ---------------------------------------------------------------------------

pub fn ranking_table(ui: &mut Ui, state: &AppState) {
    let dataset = &state.context.dataset;

    ui.label(RichText::new(format!("Top {} municipalities by active businesses", state.ranking.len())).strong());
    ui.push_id("ranking_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(TABLE_HEIGHT)
            .column(Column::exact(28.0))
            .column(Column::auto().at_least(160.0))
            .column(Column::auto())
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for name in ["#", COL_REGION_NAME, COL_REGION_CODE, COL_BUSINESS_COUNT] {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for (pos, &idx) in state.ranking.iter().enumerate() {
                    let rec = &dataset.records[idx];
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label((pos + 1).to_string());
                        });
                        row.col(|ui| {
                            ui.label(rec.region_name.as_str());
                        });
                        row.col(|ui| {
                            ui.label(rec.region_code.as_str());
                        });
                        row.col(|ui| {
                            ui.label(rec.business_count.to_string());
                        });
                    });
                }
            });
    });
}

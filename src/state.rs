use std::sync::Arc;

use crate::color::ColorMap;
use crate::context::DashboardContext;
use crate::data::filter::{RegionSelection, filter_indices, init_selection};
use crate::data::predict::{SimulationOutcome, fit_line, simulate};
use crate::data::rank::{RANKING_SIZE, top_by_business_count};

pub const EMPTY_SELECTION_NOTICE: &str =
    "No state selected: showing every municipality.";
pub const FIT_LINE_WARNING: &str = "Could not compute the regression line.";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Per-session UI state, independent of rendering.
///
/// Can only be built from a loaded [`DashboardContext`]; everything else is
/// derived from the current region selection by [`AppState::refresh`].
pub struct AppState {
    /// Loaded dataset and model (shared, read-only).
    pub context: Arc<DashboardContext>,

    /// Region codes currently ticked.
    pub selection: RegionSelection,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Shown when the selection is empty and the filter fell back.
    pub filter_notice: Option<&'static str>,

    /// `[gdp_total, predicted]` pairs sorted by GDP, if prediction succeeded.
    pub fit_line: Option<Vec<[f64; 2]>>,

    /// Shown in place of the regression line when it failed.
    pub fit_warning: Option<String>,

    /// Indices of the top records by business count.
    pub ranking: Vec<usize>,

    /// Per-region point colours.
    pub color_map: ColorMap,

    /// Scenario simulation inputs.
    pub sim_gdp: f64,
    pub sim_population: f64,

    /// Result of the last "Predict" press.
    pub sim_outcome: Option<SimulationOutcome>,
}

impl AppState {
    /// Start a session with every region selected.
    pub fn new(context: Arc<DashboardContext>) -> Self {
        let dataset = &context.dataset;
        let mut state = Self {
            selection: init_selection(dataset),
            color_map: ColorMap::new(&dataset.region_codes),
            visible_indices: Vec::new(),
            filter_notice: None,
            fit_line: None,
            fit_warning: None,
            ranking: Vec::new(),
            sim_gdp: 0.0,
            sim_population: 0.0,
            sim_outcome: None,
            context,
        };
        state.refresh();
        state
    }

    /// Recompute filter → fit line → ranking after a selection change.
    pub fn refresh(&mut self) {
        let ctx = Arc::clone(&self.context);
        let dataset = &ctx.dataset;

        let outcome = filter_indices(dataset, &self.selection);
        if outcome.fell_back {
            log::warn!("Empty region selection, showing all {} records", dataset.len());
        }
        self.filter_notice = outcome.fell_back.then_some(EMPTY_SELECTION_NOTICE);
        self.visible_indices = outcome.indices;

        match fit_line(&ctx.model, dataset, &self.visible_indices) {
            Ok(points) => {
                self.fit_line = Some(points);
                self.fit_warning = None;
            }
            Err(e) => {
                log::warn!("Regression line skipped: {e}");
                self.fit_line = None;
                self.fit_warning = Some(format!("{FIT_LINE_WARNING} ({e})"));
            }
        }

        self.ranking = top_by_business_count(dataset, &self.visible_indices, RANKING_SIZE);
        log::debug!(
            "Refreshed: {} visible, {} ranked",
            self.visible_indices.len(),
            self.ranking.len()
        );
    }

    /// Toggle a single region in the selection.
    pub fn toggle_region(&mut self, code: &str) {
        if !self.selection.remove(code) {
            self.selection.insert(code.to_string());
        }
        self.refresh();
    }

    /// Select every region.
    pub fn select_all(&mut self) {
        self.selection = init_selection(&self.context.dataset);
        self.refresh();
    }

    /// Deselect every region.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.refresh();
    }

    /// Run the scenario simulation on the current inputs.
    pub fn run_simulation(&mut self) {
        let outcome = simulate(&self.context.model, self.sim_gdp, self.sim_population);
        match &outcome {
            SimulationOutcome::Estimate { estimate, .. } => log::info!(
                "Simulation: gdp={} population={} → {estimate}",
                self.sim_gdp,
                self.sim_population
            ),
            SimulationOutcome::Invalid(msg) | SimulationOutcome::Failed(msg) => {
                log::warn!("Simulation rejected: {msg}")
            }
        }
        self.sim_outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::model::Dataset;
    use crate::data::model::tests::record;
    use crate::data::regression::LinearModel;

    fn state_with(model: LinearModel) -> AppState {
        let dataset = Dataset::from_records(
            vec![
                record("Santos", "SP", 21_000, 2.1e10, 433_000.0),
                record("Niterói", "RJ", 18_000, 2.5e10, 515_000.0),
                record("Campinas", "SP", 60_000, 6.5e10, 1_200_000.0),
            ],
            0,
        );
        let ctx = DashboardContext::new(AppConfig::default(), dataset, model);
        AppState::new(Arc::new(ctx))
    }

    fn state() -> AppState {
        state_with(LinearModel::new(1e-6, 0.01, 100.0))
    }

    #[test]
    fn new_session_shows_everything() {
        let s = state();
        assert_eq!(s.visible_indices, vec![0, 1, 2]);
        assert_eq!(s.ranking, vec![2, 0, 1]);
        assert_eq!(s.fit_line.as_ref().map(Vec::len), Some(3));
        assert!(s.filter_notice.is_none());
    }

    #[test]
    fn toggling_a_region_refilters() {
        let mut s = state();
        s.toggle_region("SP");
        assert_eq!(s.visible_indices, vec![1]);
        assert_eq!(s.ranking, vec![1]);
        s.toggle_region("SP");
        assert_eq!(s.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn selecting_none_falls_back_with_notice() {
        let mut s = state();
        s.select_none();
        assert!(s.selection.is_empty());
        assert_eq!(s.visible_indices, vec![0, 1, 2]);
        assert_eq!(s.filter_notice, Some(EMPTY_SELECTION_NOTICE));

        s.select_all();
        assert!(s.filter_notice.is_none());
    }

    #[test]
    fn header_only_dataset_shows_no_fallback_notice() {
        let dataset = Dataset::from_records(Vec::new(), 0);
        let model = LinearModel::new(1e-6, 0.01, 100.0);
        let ctx = DashboardContext::new(AppConfig::default(), dataset, model);
        let mut s = AppState::new(Arc::new(ctx));
        assert!(s.visible_indices.is_empty());
        assert!(s.filter_notice.is_none());

        s.select_none();
        assert!(s.filter_notice.is_none());
    }

    #[test]
    fn failing_model_only_drops_the_line() {
        let s = state_with(LinearModel::new(f64::MAX, f64::MAX, 0.0));
        assert!(s.fit_line.is_none());
        assert!(s.fit_warning.as_deref().is_some_and(|w| w.starts_with(FIT_LINE_WARNING)));
        assert_eq!(s.ranking, vec![2, 0, 1]);
        assert_eq!(s.visible_indices.len(), 3);
    }

    #[test]
    fn simulation_records_outcome() {
        let mut s = state_with(LinearModel::new(0.001, 0.0002, 5.0));
        s.run_simulation();
        assert!(matches!(s.sim_outcome, Some(SimulationOutcome::Invalid(_))));

        s.sim_gdp = 1_000_000.0;
        s.sim_population = 50_000.0;
        s.run_simulation();
        assert!(matches!(
            s.sim_outcome,
            Some(SimulationOutcome::Estimate { estimate: 1015, .. })
        ));
    }
}

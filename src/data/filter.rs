use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Region selection
// ---------------------------------------------------------------------------

/// The region codes the user has ticked.
pub type RegionSelection = BTreeSet<String>;

/// Result of applying a selection to the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Indices of visible records, in file order.
    pub indices: Vec<usize>,
    /// True when the selection was empty and every record is shown instead.
    pub fell_back: bool,
}

/// Initialise a [`RegionSelection`] with every region selected.
pub fn init_selection(dataset: &Dataset) -> RegionSelection {
    dataset.region_codes.clone()
}

/// Return indices of records whose region code is in `selection`.
///
/// An empty selection means "no filter": all records are returned and
/// [`FilterOutcome::fell_back`] is set so the UI can say so.
pub fn filter_indices(dataset: &Dataset, selection: &RegionSelection) -> FilterOutcome {
    let everything = || (0..dataset.len()).collect();

    // Every region ticked → no effective filter. Checked first so a dataset
    // with no regions at all never reports a fallback.
    if selection.is_superset(&dataset.region_codes) {
        return FilterOutcome {
            indices: everything(),
            fell_back: false,
        };
    }
    if selection.is_empty() {
        return FilterOutcome {
            indices: everything(),
            fell_back: true,
        };
    }

    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.contains(&rec.region_code))
        .map(|(i, _)| i)
        .collect();
    FilterOutcome {
        indices,
        fell_back: false,
    }
}

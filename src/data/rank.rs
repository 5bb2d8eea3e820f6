use super::model::Dataset;

/// Rows shown in the ranking table.
pub const RANKING_SIZE: usize = 10;

/// Indices of the `limit` records with the most active businesses.
///
/// Sorted descending by business count; ties keep their order in `indices`.
pub fn top_by_business_count(dataset: &Dataset, indices: &[usize], limit: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| i < dataset.len())
        .collect();
    ranked.sort_by(|&a, &b| {
        dataset.records[b]
            .business_count
            .cmp(&dataset.records[a].business_count)
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn dataset(counts: &[u64]) -> Dataset {
        let records = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| record(&format!("M{i}"), "SP", c, 1.0, 1.0))
            .collect();
        Dataset::from_records(records, 0)
    }

    #[test]
    fn returns_at_most_ten_sorted_descending() {
        let counts: Vec<u64> = (0..25).map(|i| (i * 37 % 25) as u64).collect();
        let ds = dataset(&counts);
        let all: Vec<usize> = (0..ds.len()).collect();

        let top = top_by_business_count(&ds, &all, RANKING_SIZE);
        assert_eq!(top.len(), 10);
        let ranked: Vec<u64> = top.iter().map(|&i| ds.records[i].business_count).collect();
        assert!(ranked.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(ranked[0], 24);
    }

    #[test]
    fn short_input_returns_everything() {
        let ds = dataset(&[3, 9, 1]);
        let top = top_by_business_count(&ds, &[0, 1, 2], RANKING_SIZE);
        assert_eq!(top, vec![1, 0, 2]);
    }

    #[test]
    fn ties_keep_original_order() {
        let ds = dataset(&[5, 7, 5, 7, 5]);
        let top = top_by_business_count(&ds, &[0, 1, 2, 3, 4], RANKING_SIZE);
        assert_eq!(top, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn only_filtered_rows_are_ranked() {
        let ds = dataset(&[100, 1, 50, 2]);
        let top = top_by_business_count(&ds, &[1, 3], RANKING_SIZE);
        assert_eq!(top, vec![3, 1]);
    }

    #[test]
    fn empty_input_gives_empty_ranking() {
        let ds = dataset(&[]);
        assert!(top_by_business_count(&ds, &[], RANKING_SIZE).is_empty());
    }
}

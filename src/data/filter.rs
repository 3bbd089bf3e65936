use std::collections::BTreeSet;

use super::model::{WineDataset, WineSample, WineType};

// ---------------------------------------------------------------------------
// Filter criteria: selected wine types + closed quality interval
// ---------------------------------------------------------------------------

/// The sidebar selection: which wine types are shown and the inclusive
/// quality-score interval. Invariant: `min_quality <= max_quality`, both
/// inside the dataset's observed bounds (the state setters keep it so).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub types: BTreeSet<WineType>,
    pub min_quality: u8,
    pub max_quality: u8,
}

impl FilterCriteria {
    /// Criteria that let every sample of `dataset` through.
    pub fn all(dataset: &WineDataset) -> Self {
        FilterCriteria {
            types: WineType::ALL.into_iter().collect(),
            min_quality: dataset.quality_min,
            max_quality: dataset.quality_max,
        }
    }

    /// Whether a sample passes: its type is selected AND its quality lies in
    /// `[min_quality, max_quality]` (both ends inclusive). An empty type set
    /// therefore matches nothing, which is a valid selection, not an error.
    pub fn matches(&self, sample: &WineSample) -> bool {
        self.types.contains(&sample.wine_type)
            && sample.quality >= self.min_quality
            && sample.quality <= self.max_quality
    }
}

/// Return indices of samples that pass the criteria, in dataset order.
///
/// Pure: the dataset is only read. The index vector is strictly ascending,
/// so the filtered view preserves the relative order of the input.
pub fn filtered_indices(dataset: &WineDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .samples
        .iter()
        .enumerate()
        .filter(|(_, sample)| criteria.matches(sample))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// (Red, 5), (Red, 7), (White, 5), (White, 9) — the smallest dataset that
    /// exercises both filter dimensions at once.
    fn toy_dataset() -> WineDataset {
        WineDataset::from_samples(vec![
            WineSample::for_tests(WineType::Red, 5),
            WineSample::for_tests(WineType::Red, 7),
            WineSample::for_tests(WineType::White, 5),
            WineSample::for_tests(WineType::White, 9),
        ])
    }

    fn criteria(types: &[WineType], min_quality: u8, max_quality: u8) -> FilterCriteria {
        FilterCriteria {
            types: types.iter().copied().collect(),
            min_quality,
            max_quality,
        }
    }

    #[test]
    fn type_and_range_filter_in_order() {
        let ds = toy_dataset();
        let c = criteria(&WineType::ALL, 5, 7);

        assert_eq!(filtered_indices(&ds, &c), vec![0, 1, 2]);
    }

    #[test]
    fn full_selection_is_the_identity() {
        let ds = toy_dataset();
        let c = FilterCriteria::all(&ds);

        assert_eq!(filtered_indices(&ds, &c), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_type_set_yields_empty_result() {
        let ds = toy_dataset();
        let c = criteria(&[], 5, 9);

        assert_eq!(filtered_indices(&ds, &c), Vec::<usize>::new());
    }

    #[test]
    fn single_type_selection() {
        let ds = toy_dataset();
        let c = criteria(&[WineType::White], 3, 9);

        assert_eq!(filtered_indices(&ds, &c), vec![2, 3]);
    }

    #[test]
    fn bounds_are_inclusive_on_both_ends() {
        let ds = toy_dataset();

        let only_five = criteria(&WineType::ALL, 5, 5);
        assert_eq!(filtered_indices(&ds, &only_five), vec![0, 2]);

        let nine_to_nine = criteria(&WineType::ALL, 9, 9);
        assert_eq!(filtered_indices(&ds, &nine_to_nine), vec![3]);
    }

    #[test]
    fn no_out_of_bounds_sample_slips_through() {
        let ds = toy_dataset();
        let c = criteria(&[WineType::Red], 6, 9);

        for &i in &filtered_indices(&ds, &c) {
            let s = &ds.samples[i];
            assert_eq!(s.wine_type, WineType::Red);
            assert!((6..=9).contains(&s.quality));
        }
        // ...and the one qualifying sample is not dropped.
        assert_eq!(filtered_indices(&ds, &c), vec![1]);
    }

    #[test]
    fn filtering_a_filtered_dataset_is_a_fixed_point() {
        let ds = toy_dataset();
        let c = criteria(&WineType::ALL, 5, 7);

        let once: Vec<WineSample> = filtered_indices(&ds, &c)
            .into_iter()
            .map(|i| ds.samples[i].clone())
            .collect();
        let refiltered = WineDataset::from_samples(once.clone());

        let twice: Vec<WineSample> = filtered_indices(&refiltered, &c)
            .into_iter()
            .map(|i| refiltered.samples[i].clone())
            .collect();

        assert_eq!(once, twice);
    }
}

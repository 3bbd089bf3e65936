use std::collections::BTreeSet;

use crate::config::DashboardConfig;
use crate::data::aggregate::{self, CorrelationMatrix, SummaryStats};
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::loader;
use crate::data::model::{Column, WineDataset, WineType};

// ---------------------------------------------------------------------------
// Derived aggregates
// ---------------------------------------------------------------------------

/// Everything derived from the filtered view that outlives a single frame:
/// the four metric cards, the grouped-mean trend, and the correlation
/// matrix. Recomputed wholesale on every filter change, never incrementally.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub quality: Option<SummaryStats>,
    pub alcohol: Option<SummaryStats>,
    pub ph: Option<SummaryStats>,
    pub density: Option<SummaryStats>,
    /// Mean free sulfur dioxide per quality score, ascending.
    pub sulfur_trend: Vec<(u8, f64)>,
    /// Pearson matrix over all 12 numeric columns.
    pub correlation: CorrelationMatrix,
}

impl Aggregates {
    pub fn compute(dataset: &WineDataset, indices: &[usize]) -> Self {
        Aggregates {
            quality: aggregate::summary_stats(dataset, indices, Column::Quality),
            alcohol: aggregate::summary_stats(dataset, indices, Column::Alcohol),
            ph: aggregate::summary_stats(dataset, indices, Column::Ph),
            density: aggregate::summary_stats(dataset, indices, Column::Density),
            sulfur_trend: aggregate::mean_by_quality(dataset, indices, Column::FreeSulfurDioxide),
            correlation: aggregate::correlation_matrix(dataset, indices, &Column::ALL),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a load succeeds). Immutable once set;
    /// everything downstream borrows it.
    pub dataset: Option<WineDataset>,

    /// Current sidebar selection.
    pub criteria: FilterCriteria,

    /// Indices of samples passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over the filtered view (cached alongside the indices).
    pub aggregates: Aggregates,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and attempt the startup load from the configured
    /// data directory. On failure the dashboard stays dark: only the error
    /// screen renders until a reload succeeds.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState {
            config,
            dataset: None,
            criteria: FilterCriteria {
                types: BTreeSet::new(),
                min_quality: 0,
                max_quality: 0,
            },
            visible_indices: Vec::new(),
            aggregates: Aggregates::default(),
            status_message: None,
        };
        state.reload();
        state
    }

    /// (Re)load both CSVs from `config.data_dir`.
    pub fn reload(&mut self) {
        let (red, white) = loader::dataset_paths(&self.config.data_dir);
        match loader::load_dataset(&red, &white) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(err) => {
                log::error!("Failed to load dataset: {err}");
                self.dataset = None;
                self.visible_indices.clear();
                self.aggregates = Aggregates::default();
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Ingest a loaded dataset and initialise the criteria: the configured
    /// default quality range, clamped to the observed bounds.
    pub fn set_dataset(&mut self, dataset: WineDataset) {
        let mut criteria = FilterCriteria::all(&dataset);
        if let Some((lo, hi)) = self.config.default_quality_range {
            criteria.min_quality = lo.clamp(dataset.quality_min, dataset.quality_max);
            criteria.max_quality = hi.clamp(dataset.quality_min, dataset.quality_max);
        }

        self.criteria = criteria;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and every derived aggregate.
    pub fn refilter(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.visible_indices = filtered_indices(dataset, &self.criteria);
            self.aggregates = Aggregates::compute(dataset, &self.visible_indices);
            log::debug!(
                "{} of {} samples match the current filters",
                self.visible_indices.len(),
                dataset.len()
            );
        }
    }

    /// Flip one wine type in or out of the selection.
    pub fn toggle_wine_type(&mut self, wine_type: WineType) {
        if !self.criteria.types.remove(&wine_type) {
            self.criteria.types.insert(wine_type);
        }
        self.refilter();
    }

    pub fn select_all_types(&mut self) {
        self.criteria.types = WineType::ALL.into_iter().collect();
        self.refilter();
    }

    pub fn select_no_types(&mut self) {
        self.criteria.types.clear();
        self.refilter();
    }

    /// Set the quality interval. Ends are swapped if needed and clamped to
    /// the observed bounds, so `min <= max` always holds afterwards.
    pub fn set_quality_range(&mut self, lo: u8, hi: u8) {
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        if let Some(dataset) = &self.dataset {
            self.criteria.min_quality = lo.clamp(dataset.quality_min, dataset.quality_max);
            self.criteria.max_quality = hi.clamp(dataset.quality_min, dataset.quality_max);
        } else {
            self.criteria.min_quality = lo;
            self.criteria.max_quality = hi;
        }
        self.refilter();
    }

    /// Back to "everything visible".
    pub fn reset_filters(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.criteria = FilterCriteria::all(dataset);
        }
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::data::model::WineSample;

    use super::*;

    fn state_with(samples: Vec<WineSample>) -> AppState {
        let mut state = AppState {
            config: DashboardConfig::default(),
            dataset: None,
            criteria: FilterCriteria {
                types: BTreeSet::new(),
                min_quality: 0,
                max_quality: 0,
            },
            visible_indices: Vec::new(),
            aggregates: Aggregates::default(),
            status_message: None,
        };
        state.set_dataset(WineDataset::from_samples(samples));
        state
    }

    fn toy_samples() -> Vec<WineSample> {
        vec![
            WineSample::for_tests(WineType::Red, 3),
            WineSample::for_tests(WineType::Red, 6),
            WineSample::for_tests(WineType::White, 7),
            WineSample::for_tests(WineType::White, 9),
        ]
    }

    #[test]
    fn default_range_is_clamped_to_observed_bounds() {
        // Config default is (5, 8); observed bounds here are [3, 9].
        let state = state_with(toy_samples());
        assert_eq!(state.criteria.min_quality, 5);
        assert_eq!(state.criteria.max_quality, 8);
        assert_eq!(state.visible_indices, vec![1, 2]);

        // Narrow dataset: the default collapses onto the observed range.
        let narrow = state_with(vec![
            WineSample::for_tests(WineType::Red, 4),
            WineSample::for_tests(WineType::White, 4),
        ]);
        assert_eq!(narrow.criteria.min_quality, 4);
        assert_eq!(narrow.criteria.max_quality, 4);
        assert_eq!(narrow.visible_indices, vec![0, 1]);
    }

    #[test]
    fn toggling_types_refilters() {
        let mut state = state_with(toy_samples());
        state.reset_filters();
        assert_eq!(state.visible_indices.len(), 4);

        state.toggle_wine_type(WineType::White);
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.toggle_wine_type(WineType::White);
        assert_eq!(state.visible_indices.len(), 4);

        state.select_no_types();
        assert!(state.visible_indices.is_empty());
        assert!(state.aggregates.quality.is_none());

        state.select_all_types();
        assert_eq!(state.visible_indices.len(), 4);
    }

    #[test]
    fn quality_range_setter_keeps_the_invariant() {
        let mut state = state_with(toy_samples());

        // Swapped ends are reordered, out-of-bounds ends are clamped.
        state.set_quality_range(8, 2);
        assert_eq!(state.criteria.min_quality, 3);
        assert_eq!(state.criteria.max_quality, 8);
        assert!(state.criteria.min_quality <= state.criteria.max_quality);
    }

    #[test]
    fn refilter_recomputes_aggregates() {
        let mut state = state_with(toy_samples());
        state.reset_filters();
        let full = state.aggregates.quality.unwrap();
        assert!((full.mean - 6.25).abs() < 1e-12);

        state.set_quality_range(3, 6);
        let narrowed = state.aggregates.quality.unwrap();
        assert!((narrowed.mean - 4.5).abs() < 1e-12);
        assert_eq!(state.aggregates.sulfur_trend.len(), 2);
    }

    #[test]
    fn startup_with_missing_files_reports_and_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };

        let state = AppState::new(config);
        assert!(state.dataset.is_none());
        assert!(state.visible_indices.is_empty());
        let message = state.status_message.unwrap();
        assert!(message.contains("winequality-red.csv"), "{message}");
    }
}

use std::env;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup knobs for the dashboard. Plain values only: no CLI flags, no
/// environment variables.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Window and page title.
    pub title: String,
    /// Directory containing `winequality-red.csv` / `winequality-white.csv`.
    /// Defaults to the process working directory; the error screen lets the
    /// user repoint it at runtime.
    pub data_dir: PathBuf,
    /// Initial quality-score selection, clamped to the observed bounds once
    /// the dataset is loaded. `None` selects the full observed range.
    pub default_quality_range: Option<(u8, u8)>,
    /// Print the coefficient inside each correlation-heatmap cell.
    pub annotate_heatmap: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "Vinho Verde Wine Quality Dashboard".to_owned(),
            data_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            default_quality_range: Some((5, 8)),
            annotate_heatmap: true,
        }
    }
}

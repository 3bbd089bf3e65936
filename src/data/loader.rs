use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{WineDataset, WineSample, WineType};

/// File names the dashboard expects inside the data directory.
pub const RED_FILE: &str = "winequality-red.csv";
pub const WHITE_FILE: &str = "winequality-white.csv";

/// Resolve the two source-file locations inside `dir`.
pub fn dataset_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(RED_FILE), dir.join(WHITE_FILE))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Fatal for the pipeline: the dashboard
/// shows the message and runs nothing else until a reload succeeds.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing data file: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("reading {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One row as it appears in the source files: semicolon-delimited, header
/// names with spaces (and `pH` casing), no provenance column.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "fixed acidity")]
    fixed_acidity: f64,
    #[serde(rename = "volatile acidity")]
    volatile_acidity: f64,
    #[serde(rename = "citric acid")]
    citric_acid: f64,
    #[serde(rename = "residual sugar")]
    residual_sugar: f64,
    chlorides: f64,
    #[serde(rename = "free sulfur dioxide")]
    free_sulfur_dioxide: f64,
    #[serde(rename = "total sulfur dioxide")]
    total_sulfur_dioxide: f64,
    density: f64,
    #[serde(rename = "pH")]
    ph: f64,
    sulphates: f64,
    alcohol: f64,
    quality: u8,
}

impl RawRecord {
    fn into_sample(self, wine_type: WineType) -> WineSample {
        WineSample {
            fixed_acidity: self.fixed_acidity,
            volatile_acidity: self.volatile_acidity,
            citric_acid: self.citric_acid,
            residual_sugar: self.residual_sugar,
            chlorides: self.chlorides,
            free_sulfur_dioxide: self.free_sulfur_dioxide,
            total_sulfur_dioxide: self.total_sulfur_dioxide,
            density: self.density,
            ph: self.ph,
            sulphates: self.sulphates,
            alcohol: self.alcohol,
            quality: self.quality,
            wine_type,
        }
    }
}

/// Load and merge the two source files into one dataset.
///
/// Rows from `red_path` are tagged [`WineType::Red`], rows from `white_path`
/// [`WineType::White`]; the merged order is red rows then white rows. Both
/// files must exist before any parsing starts, so a missing file never yields
/// a partially loaded dataset. The function has no side effects: callers hold
/// the result for the process lifetime and re-invoke it only on an explicit
/// reload.
pub fn load_dataset(red_path: &Path, white_path: &Path) -> Result<WineDataset, LoadError> {
    for path in [red_path, white_path] {
        if !path.exists() {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            });
        }
    }

    let mut samples = read_samples(red_path, WineType::Red)?;
    let red_rows = samples.len();
    samples.extend(read_samples(white_path, WineType::White)?);

    log::info!(
        "Loaded {} red + {} white samples",
        red_rows,
        samples.len() - red_rows
    );

    Ok(WineDataset::from_samples(samples))
}

fn read_samples(path: &Path, wine_type: WineType) -> Result<Vec<WineSample>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(csv_err)?;

    let mut samples = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        let record = result.map_err(csv_err)?;
        samples.push(record.into_sample(wine_type));
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "fixed acidity;volatile acidity;citric acid;residual sugar;\
chlorides;free sulfur dioxide;total sulfur dioxide;density;pH;sulphates;alcohol;quality";

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        fs::write(&path, text).unwrap();
        path
    }

    fn fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
        let red = write_csv(
            dir,
            RED_FILE,
            &[
                "7.4;0.70;0.00;1.9;0.076;11;34;0.9978;3.51;0.56;9.4;5",
                "7.8;0.88;0.00;2.6;0.098;25;67;0.9968;3.20;0.68;9.8;5",
                "11.2;0.28;0.56;1.9;0.075;17;60;0.9980;3.16;0.58;9.8;6",
            ],
        );
        let white = write_csv(
            dir,
            WHITE_FILE,
            &[
                "7.0;0.27;0.36;20.7;0.045;45;170;1.0010;3.00;0.45;8.8;6",
                "6.3;0.30;0.34;1.6;0.049;14;132;0.9940;3.30;0.49;9.5;8",
            ],
        );
        (red, white)
    }

    #[test]
    fn merges_red_then_white_with_provenance_tags() {
        let dir = TempDir::new().unwrap();
        let (red, white) = fixture(&dir);

        let ds = load_dataset(&red, &white).unwrap();

        assert_eq!(ds.len(), 5);
        let types: Vec<WineType> = ds.samples.iter().map(|s| s.wine_type).collect();
        assert_eq!(
            types,
            vec![
                WineType::Red,
                WineType::Red,
                WineType::Red,
                WineType::White,
                WineType::White,
            ]
        );

        // Spot-check parsed values, including the `pH` header casing.
        assert_eq!(ds.samples[0].fixed_acidity, 7.4);
        assert_eq!(ds.samples[0].ph, 3.51);
        assert_eq!(ds.samples[0].quality, 5);
        assert_eq!(ds.samples[3].residual_sugar, 20.7);
        assert_eq!(ds.samples[4].quality, 8);

        assert_eq!(ds.count_of(WineType::Red), 3);
        assert_eq!(ds.count_of(WineType::White), 2);
        assert_eq!((ds.quality_min, ds.quality_max), (5, 8));
    }

    #[test]
    fn missing_red_file_is_an_error_naming_the_path() {
        let dir = TempDir::new().unwrap();
        let red = dir.path().join(RED_FILE);
        let white = write_csv(
            &dir,
            WHITE_FILE,
            &["7.0;0.27;0.36;20.7;0.045;45;170;1.0010;3.00;0.45;8.8;6"],
        );

        let err = load_dataset(&red, &white).unwrap_err();
        match err {
            LoadError::MissingFile { path } => assert_eq!(path, red),
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn missing_white_file_is_an_error_naming_the_path() {
        let dir = TempDir::new().unwrap();
        let red = write_csv(
            &dir,
            RED_FILE,
            &["7.4;0.70;0.00;1.9;0.076;11;34;0.9978;3.51;0.56;9.4;5"],
        );
        let white = dir.path().join(WHITE_FILE);

        let err = load_dataset(&red, &white).unwrap_err();
        match err {
            LoadError::MissingFile { path } => assert_eq!(path, white),
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn malformed_row_is_a_csv_error() {
        let dir = TempDir::new().unwrap();
        let red = write_csv(
            &dir,
            RED_FILE,
            &["7.4;not a number;0.00;1.9;0.076;11;34;0.9978;3.51;0.56;9.4;5"],
        );
        let white = write_csv(
            &dir,
            WHITE_FILE,
            &["7.0;0.27;0.36;20.7;0.045;45;170;1.0010;3.00;0.45;8.8;6"],
        );

        let err = load_dataset(&red, &white).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }), "got {err:?}");
    }

    #[test]
    fn repeated_loads_return_equivalent_datasets() {
        let dir = TempDir::new().unwrap();
        let (red, white) = fixture(&dir);

        let first = load_dataset(&red, &white).unwrap();
        let second = load_dataset(&red, &white).unwrap();

        assert_eq!(first.samples, second.samples);
    }

    #[test]
    fn dataset_paths_join_fixed_file_names() {
        let (red, white) = dataset_paths(Path::new("/srv/wine"));
        assert_eq!(red, Path::new("/srv/wine").join("winequality-red.csv"));
        assert_eq!(white, Path::new("/srv/wine").join("winequality-white.csv"));
    }
}

//! Writes synthetic stand-ins for the two Vinho Verde CSV files, matching
//! their exact header row and semicolon delimiter. Handy for trying the
//! dashboard without downloading the real dataset.

use std::path::{Path, PathBuf};

use anyhow::Context;

const RED_FILE: &str = "winequality-red.csv";
const WHITE_FILE: &str = "winequality-white.csv";

/// Header row shared by both source files, `pH` casing included.
const HEADERS: [&str; 12] = [
    "fixed acidity",
    "volatile acidity",
    "citric acid",
    "residual sugar",
    "chlorides",
    "free sulfur dioxide",
    "total sulfur dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
    "quality",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// How one measured quantity is synthesized: a normal draw around a
/// quality-adjusted mean, clamped to a physical floor.
struct FeatureSpec {
    /// Mean at quality 6.
    mean: f64,
    /// Spread of the noise around the adjusted mean.
    std: f64,
    /// Shift in the mean per quality point above 6.
    slope: f64,
    /// Physical floor; measurements never go below this.
    min: f64,
    /// Decimal places written to the CSV.
    decimals: usize,
}

impl FeatureSpec {
    const fn new(mean: f64, std: f64, slope: f64, min: f64, decimals: usize) -> Self {
        FeatureSpec {
            mean,
            std,
            slope,
            min,
            decimals,
        }
    }
}

/// Moments lifted from the published red-wine file: higher quality trends
/// toward more alcohol and sulphates, less volatile acidity and chloride.
const RED_SPECS: [FeatureSpec; 11] = [
    FeatureSpec::new(8.32, 1.70, 0.10, 3.8, 1),  // fixed acidity
    FeatureSpec::new(0.53, 0.16, -0.09, 0.08, 2), // volatile acidity
    FeatureSpec::new(0.27, 0.18, 0.05, 0.0, 2),  // citric acid
    FeatureSpec::new(2.54, 1.20, 0.00, 0.6, 1),  // residual sugar
    FeatureSpec::new(0.087, 0.035, -0.008, 0.012, 3), // chlorides
    FeatureSpec::new(15.9, 9.0, 0.0, 1.0, 0),    // free sulfur dioxide
    FeatureSpec::new(46.5, 28.0, -6.0, 6.0, 0),  // total sulfur dioxide
    FeatureSpec::new(0.9967, 0.0017, -0.0006, 0.990, 4), // density
    FeatureSpec::new(3.31, 0.15, 0.0, 2.7, 2),   // pH
    FeatureSpec::new(0.66, 0.15, 0.06, 0.33, 2), // sulphates
    FeatureSpec::new(10.42, 0.95, 0.38, 8.4, 1), // alcohol
];

/// Same shape for the white-wine file: sweeter, far more sulfur dioxide.
const WHITE_SPECS: [FeatureSpec; 11] = [
    FeatureSpec::new(6.85, 0.82, 0.00, 3.8, 1),  // fixed acidity
    FeatureSpec::new(0.28, 0.09, -0.03, 0.08, 2), // volatile acidity
    FeatureSpec::new(0.33, 0.11, 0.00, 0.0, 2),  // citric acid
    FeatureSpec::new(6.39, 4.80, -0.40, 0.6, 1), // residual sugar
    FeatureSpec::new(0.046, 0.018, -0.005, 0.009, 3), // chlorides
    FeatureSpec::new(35.3, 15.0, 1.0, 2.0, 0),   // free sulfur dioxide
    FeatureSpec::new(138.4, 40.0, -8.0, 9.0, 0), // total sulfur dioxide
    FeatureSpec::new(0.9940, 0.0028, -0.0011, 0.987, 4), // density
    FeatureSpec::new(3.19, 0.15, 0.02, 2.7, 2),  // pH
    FeatureSpec::new(0.49, 0.11, 0.01, 0.22, 2), // sulphates
    FeatureSpec::new(10.51, 1.10, 0.45, 8.0, 1), // alcohol
];

fn sample_row(specs: &[FeatureSpec; 11], quality: u8, rng: &mut SimpleRng) -> [f64; 11] {
    let dq = f64::from(quality) - 6.0;
    let mut row = [0.0_f64; 11];
    for (slot, spec) in row.iter_mut().zip(specs) {
        *slot = rng.gauss(spec.mean + spec.slope * dq, spec.std).max(spec.min);
    }
    row
}

fn write_file(
    path: &Path,
    specs: &[FeatureSpec; 11],
    rows: usize,
    quality_mean: f64,
    quality_max: u8,
    rng: &mut SimpleRng,
) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADERS)?;

    for _ in 0..rows {
        let quality = rng
            .gauss(quality_mean, 0.87)
            .round()
            .clamp(3.0, f64::from(quality_max)) as u8;
        let values = sample_row(specs, quality, rng);

        let mut record = Vec::with_capacity(HEADERS.len());
        for (value, spec) in values.iter().zip(specs) {
            record.push(format!("{value:.prec$}", prec = spec.decimals));
        }
        record.push(quality.to_string());
        writer.write_record(&record)?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // Optional target directory, defaults to the working directory.
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    // Row counts match the published files.
    let red_path = dir.join(RED_FILE);
    write_file(&red_path, &RED_SPECS, 1599, 5.64, 8, &mut rng)?;
    let white_path = dir.join(WHITE_FILE);
    write_file(&white_path, &WHITE_SPECS, 4898, 5.88, 9, &mut rng)?;

    println!(
        "Wrote 1599 red rows to {} and 4898 white rows to {}",
        red_path.display(),
        white_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauss_has_roughly_the_requested_moments() {
        let mut rng = SimpleRng::new(7);
        let draws: Vec<f64> = (0..20_000).map(|_| rng.gauss(5.0, 2.0)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert!((mean - 5.0).abs() < 0.05, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.05, "std {}", var.sqrt());
    }

    #[test]
    fn sample_rows_respect_physical_floors() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..2_000 {
            let row = sample_row(&RED_SPECS, 3, &mut rng);
            for (value, spec) in row.iter().zip(&RED_SPECS) {
                assert!(*value >= spec.min, "{value} below {}", spec.min);
            }
        }
    }

    #[test]
    fn written_files_carry_the_expected_header() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(RED_FILE);
        let mut rng = SimpleRng::new(1);
        write_file(&path, &RED_SPECS, 5, 5.64, 8, &mut rng).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, HEADERS.join(";"));
        assert_eq!(text.lines().count(), 6);
    }
}

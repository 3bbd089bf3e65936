// ---------------------------------------------------------------------------
// WineType – provenance label attached at load time
// ---------------------------------------------------------------------------

/// Which source file a sample came from. Not present in the CSVs themselves;
/// the loader tags every row. `Ord` so the filter can keep a `BTreeSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WineType {
    Red,
    White,
}

impl WineType {
    pub const ALL: [WineType; 2] = [WineType::Red, WineType::White];

    pub fn label(&self) -> &'static str {
        match self {
            WineType::Red => "Red",
            WineType::White => "White",
        }
    }
}

// ---------------------------------------------------------------------------
// WineSample – one row of the merged table
// ---------------------------------------------------------------------------

/// A single wine measurement: 11 physicochemical features, an integer
/// quality score, and the provenance label.
#[derive(Debug, Clone, PartialEq)]
pub struct WineSample {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
    pub quality: u8,
    pub wine_type: WineType,
}

#[cfg(test)]
impl WineSample {
    /// All-zero sample for tests; set the fields a test cares about directly.
    pub(crate) fn for_tests(wine_type: WineType, quality: u8) -> Self {
        WineSample {
            fixed_acidity: 0.0,
            volatile_acidity: 0.0,
            citric_acid: 0.0,
            residual_sugar: 0.0,
            chlorides: 0.0,
            free_sulfur_dioxide: 0.0,
            total_sulfur_dioxide: 0.0,
            density: 0.0,
            ph: 0.0,
            sulphates: 0.0,
            alcohol: 0.0,
            quality,
            wine_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the numeric columns of the table
// ---------------------------------------------------------------------------

/// One of the 12 numeric columns (11 features + quality). The provenance
/// label is deliberately not a `Column`: everything downstream of this enum
/// (stats, correlation, table cells) is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FixedAcidity,
    VolatileAcidity,
    CitricAcid,
    ResidualSugar,
    Chlorides,
    FreeSulfurDioxide,
    TotalSulfurDioxide,
    Density,
    Ph,
    Sulphates,
    Alcohol,
    Quality,
}

impl Column {
    /// All numeric columns, in source-file order.
    pub const ALL: [Column; 12] = [
        Column::FixedAcidity,
        Column::VolatileAcidity,
        Column::CitricAcid,
        Column::ResidualSugar,
        Column::Chlorides,
        Column::FreeSulfurDioxide,
        Column::TotalSulfurDioxide,
        Column::Density,
        Column::Ph,
        Column::Sulphates,
        Column::Alcohol,
        Column::Quality,
    ];

    /// Column name exactly as it appears in the CSV header.
    pub fn label(&self) -> &'static str {
        match self {
            Column::FixedAcidity => "fixed acidity",
            Column::VolatileAcidity => "volatile acidity",
            Column::CitricAcid => "citric acid",
            Column::ResidualSugar => "residual sugar",
            Column::Chlorides => "chlorides",
            Column::FreeSulfurDioxide => "free sulfur dioxide",
            Column::TotalSulfurDioxide => "total sulfur dioxide",
            Column::Density => "density",
            Column::Ph => "pH",
            Column::Sulphates => "sulphates",
            Column::Alcohol => "alcohol",
            Column::Quality => "quality",
        }
    }

    /// Abbreviated name for cramped axes (heatmap ticks).
    pub fn short_label(&self) -> &'static str {
        match self {
            Column::FixedAcidity => "f.acid",
            Column::VolatileAcidity => "v.acid",
            Column::CitricAcid => "citric",
            Column::ResidualSugar => "sugar",
            Column::Chlorides => "chlor",
            Column::FreeSulfurDioxide => "f.SO2",
            Column::TotalSulfurDioxide => "t.SO2",
            Column::Density => "dens",
            Column::Ph => "pH",
            Column::Sulphates => "sulph",
            Column::Alcohol => "alc",
            Column::Quality => "qual",
        }
    }

    /// Decimal places used when a value of this column is displayed.
    pub fn decimals(&self) -> usize {
        match self {
            Column::Density => 4,
            Column::Chlorides => 3,
            Column::FreeSulfurDioxide | Column::TotalSulfurDioxide => 1,
            Column::Quality => 0,
            _ => 2,
        }
    }

    /// Read this column's value from a sample (quality widened to `f64`).
    pub fn value(&self, sample: &WineSample) -> f64 {
        match self {
            Column::FixedAcidity => sample.fixed_acidity,
            Column::VolatileAcidity => sample.volatile_acidity,
            Column::CitricAcid => sample.citric_acid,
            Column::ResidualSugar => sample.residual_sugar,
            Column::Chlorides => sample.chlorides,
            Column::FreeSulfurDioxide => sample.free_sulfur_dioxide,
            Column::TotalSulfurDioxide => sample.total_sulfur_dioxide,
            Column::Density => sample.density,
            Column::Ph => sample.ph,
            Column::Sulphates => sample.sulphates,
            Column::Alcohol => sample.alcohol,
            Column::Quality => f64::from(sample.quality),
        }
    }
}

// ---------------------------------------------------------------------------
// WineDataset – the merged table
// ---------------------------------------------------------------------------

/// The full merged dataset with precomputed bounds. Built once at startup,
/// never mutated afterwards: filters and aggregates only ever borrow it.
#[derive(Debug, Clone)]
pub struct WineDataset {
    /// All samples, red rows first, then white rows (load order).
    pub samples: Vec<WineSample>,
    /// Observed quality bounds; `(0, 0)` when the dataset is empty.
    pub quality_min: u8,
    pub quality_max: u8,
    pub red_count: usize,
    pub white_count: usize,
}

impl WineDataset {
    pub fn from_samples(samples: Vec<WineSample>) -> Self {
        let mut quality_min = u8::MAX;
        let mut quality_max = u8::MIN;
        let mut red_count = 0;
        let mut white_count = 0;

        for s in &samples {
            quality_min = quality_min.min(s.quality);
            quality_max = quality_max.max(s.quality);
            match s.wine_type {
                WineType::Red => red_count += 1,
                WineType::White => white_count += 1,
            }
        }
        if samples.is_empty() {
            quality_min = 0;
            quality_max = 0;
        }

        WineDataset {
            samples,
            quality_min,
            quality_max,
            red_count,
            white_count,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn count_of(&self, wine_type: WineType) -> usize {
        match wine_type {
            WineType::Red => self.red_count,
            WineType::White => self.white_count,
        }
    }
}

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::WineType;

// ---------------------------------------------------------------------------
// Fixed series colors
// ---------------------------------------------------------------------------

/// Series color for a wine type: burgundy for red, gold for white.
pub fn wine_color(wine_type: WineType) -> Color32 {
    let hsl = match wine_type {
        WineType::Red => Hsl::new(348.0, 0.55, 0.42),
        WineType::White => Hsl::new(42.0, 0.80, 0.52),
    };
    to_color32(hsl.into_color())
}

/// Translucent variant for filled areas (violins, histograms, KDE fills).
pub fn wine_fill(wine_type: WineType) -> Color32 {
    wine_color(wine_type).gamma_multiply(0.45)
}

// ---------------------------------------------------------------------------
// Quality gradient (low → high score)
// ---------------------------------------------------------------------------

/// Continuous color for a quality score within the observed `[min, max]`
/// bounds: dark violet for the low end sweeping to warm yellow at the top.
pub fn quality_color(quality: u8, min: u8, max: u8) -> Color32 {
    let t = if max > min {
        f32::from(quality.saturating_sub(min)) / f32::from(max - min)
    } else {
        0.5
    };
    let hsl = Hsl::new(260.0 - 210.0 * t, 0.65, 0.30 + 0.35 * t);
    to_color32(hsl.into_color())
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation coefficients
// ---------------------------------------------------------------------------

/// Red/blue diverging scale centered on zero: -1 → deep blue, 0 → off-white,
/// +1 → deep red. `NaN` (undefined coefficient) renders gray.
pub fn diverging_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::from_gray(110);
    }
    let r = r.clamp(-1.0, 1.0) as f32;

    let blue: LinSrgb = Srgb::new(0.13f32, 0.40, 0.67).into_linear();
    let white: LinSrgb = Srgb::new(0.96f32, 0.96, 0.96).into_linear();
    let red: LinSrgb = Srgb::new(0.70f32, 0.09, 0.17).into_linear();

    let mixed = if r < 0.0 {
        blue.mix(white, 1.0 + r)
    } else {
        white.mix(red, r)
    };
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wine_types_get_distinct_colors() {
        assert_ne!(wine_color(WineType::Red), wine_color(WineType::White));
    }

    #[test]
    fn diverging_scale_endpoints_and_center() {
        let negative = diverging_color(-1.0);
        let center = diverging_color(0.0);
        let positive = diverging_color(1.0);

        // Deep blue on the left, deep red on the right, light in the middle.
        assert!(negative.b() > negative.r());
        assert!(positive.r() > positive.b());
        assert!(center.r() > 200 && center.g() > 200 && center.b() > 200);
    }

    #[test]
    fn diverging_scale_maps_nan_to_gray() {
        let gray = diverging_color(f64::NAN);
        assert_eq!(gray.r(), gray.g());
        assert_eq!(gray.g(), gray.b());
    }

    #[test]
    fn quality_gradient_spans_the_bounds() {
        let low = quality_color(3, 3, 9);
        let high = quality_color(9, 3, 9);
        assert_ne!(low, high);

        // Degenerate bounds still produce a color (mid-scale).
        let _ = quality_color(6, 6, 6);
    }
}

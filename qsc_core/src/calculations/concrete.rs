//! # Concrete Quantity Calculation
//!
//! Estimates material quantities for a cast concrete element (slab, beam,
//! footing) from its bounding dimensions and a volumetric mix ratio.
//!
//! ## Method
//!
//! - Wet (cast) volume is length x width x height
//! - Dry volume of loose constituents = wet volume x 1.54
//! - The dry volume is partitioned across cement/sand/aggregate by the
//!   mix-ratio shares
//! - Cement bags follow from 1440 kg/m3 bulk density and 50 kg bags
//! - The waste factor is applied to each exported figure independently,
//!   from its own unadjusted baseline
//!
//! ## Example
//!
//! ```rust
//! use qsc_core::calculations::concrete::{ConcreteInput, calculate};
//!
//! let input = ConcreteInput {
//!     name: "Ground Floor Slab".to_string(),
//!     length_m: 2.0,
//!     width_m: 3.0,
//!     height_m: 0.15,
//!     concrete_mix: "1:2:4".to_string(),
//!     waste_factor_pct: 5.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Wet volume: {:.2} m3", result.wet_volume_m3);
//! println!("Cement: {:.1} bags", result.cement_bags);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{CEMENT_BAG_KG, CEMENT_DENSITY_KG_M3};
use crate::errors::{CalcError, CalcResult};
use crate::mix::MixRatio;

/// Empirical dry-to-wet expansion factor for cast concrete.
///
/// Fixed, not configurable: stored results depend on it.
pub const CONCRETE_DRY_VOLUME_FACTOR: f64 = 1.54;

/// Input parameters for a concrete quantity calculation.
///
/// All dimensions are in meters; the mix ratio is a 3-part
/// cement:sand:aggregate string.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Ground Floor Slab",
///   "length_m": 2.0,
///   "width_m": 3.0,
///   "height_m": 0.15,
///   "concrete_mix": "1:2:4",
///   "waste_factor_pct": 5.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteInput {
    /// User label for this element (e.g., "Ground Floor Slab")
    pub name: String,

    /// Length in meters
    pub length_m: f64,

    /// Width in meters
    pub width_m: f64,

    /// Height (thickness/depth) in meters
    pub height_m: f64,

    /// Volumetric mix ratio, cement:sand:aggregate (e.g., "1:2:4")
    pub concrete_mix: String,

    /// Waste surplus percentage in [0, 100]
    pub waste_factor_pct: f64,
}

impl ConcreteInput {
    /// Validate input parameters.
    ///
    /// Checks dimensions and waste factor only; the mix string is parsed
    /// (and thereby validated) during [`calculate`].
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("length_m", self.length_m),
            ("width_m", self.width_m),
            ("height_m", self.height_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_dimension(
                    field,
                    value.to_string(),
                    "Dimension must be positive",
                ));
            }
        }
        validate_waste_factor(self.waste_factor_pct)?;
        Ok(())
    }
}

/// Validate a waste-factor percentage: finite and within [0, 100].
///
/// Out-of-range values are rejected, never clamped.
pub(crate) fn validate_waste_factor(pct: f64) -> CalcResult<()> {
    if !pct.is_finite() || pct < 0.0 || pct > 100.0 {
        return Err(CalcError::invalid_waste_factor(
            pct.to_string(),
            "Waste factor must be between 0 and 100",
        ));
    }
    Ok(())
}

/// Calculated concrete quantities. All figures are waste-adjusted.
///
/// No rounding is applied; `cement_bags` stays a real number and callers
/// round for display (typically to 1 decimal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteQuantities {
    /// Wet (cast) volume in m3
    pub wet_volume_m3: f64,

    /// Dry constituent volume in m3 (wet x 1.54)
    pub dry_volume_m3: f64,

    /// Cement share of the dry volume in m3
    pub cement_volume_m3: f64,

    /// Sand share of the dry volume in m3
    pub sand_volume_m3: f64,

    /// Aggregate share of the dry volume in m3
    pub aggregate_volume_m3: f64,

    /// Cement demand in 50 kg bags (fractional)
    pub cement_bags: f64,
}

/// Calculate concrete material quantities.
///
/// Pure function: validates the input, parses the mix, computes unadjusted
/// volumes, then applies `(1 + waste/100)` to every exported figure
/// independently.
///
/// # Returns
///
/// * `Ok(ConcreteQuantities)` - all figures waste-adjusted
/// * `Err(CalcError)` - `InvalidDimension`, `InvalidWasteFactor`, or
///   `InvalidMixRatio`; no partial result is produced
///
/// # Example
///
/// ```rust
/// use qsc_core::calculations::concrete::{ConcreteInput, calculate};
///
/// let input = ConcreteInput {
///     name: "Slab".to_string(),
///     length_m: 4.0,
///     width_m: 3.0,
///     height_m: 0.1,
///     concrete_mix: "1:1.5:3".to_string(),
///     waste_factor_pct: 0.0,
/// };
/// let result = calculate(&input).unwrap();
/// assert!((result.wet_volume_m3 - 1.2).abs() < 1e-12);
/// ```
pub fn calculate(input: &ConcreteInput) -> CalcResult<ConcreteQuantities> {
    input.validate()?;

    let mix = MixRatio::parse(&input.concrete_mix, 3)?;

    let wet_volume = input.length_m * input.width_m * input.height_m;
    let dry_volume = wet_volume * CONCRETE_DRY_VOLUME_FACTOR;

    let cement_volume = mix.share(0) * dry_volume;
    let sand_volume = mix.share(1) * dry_volume;
    let aggregate_volume = mix.share(2) * dry_volume;

    let cement_bags = cement_volume * CEMENT_DENSITY_KG_M3 / CEMENT_BAG_KG;

    // Each exported figure is inflated from its own unadjusted baseline,
    // not derived from an already-inflated upstream quantity.
    let waste = 1.0 + input.waste_factor_pct / 100.0;

    Ok(ConcreteQuantities {
        wet_volume_m3: wet_volume * waste,
        dry_volume_m3: dry_volume * waste,
        cement_volume_m3: cement_volume * waste,
        sand_volume_m3: sand_volume * waste,
        aggregate_volume_m3: aggregate_volume * waste,
        cement_bags: cement_bags * waste,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab_input() -> ConcreteInput {
        ConcreteInput {
            name: "Test Slab".to_string(),
            length_m: 2.0,
            width_m: 3.0,
            height_m: 0.15,
            concrete_mix: "1:2:4".to_string(),
            waste_factor_pct: 5.0,
        }
    }

    #[test]
    fn test_slab_quantities() {
        // 2 x 3 x 0.15 slab, 1:2:4 mix, 5% waste
        let result = calculate(&slab_input()).unwrap();

        // wet = 0.9 x 1.05 = 0.945 m3
        assert!((result.wet_volume_m3 - 0.945).abs() < 1e-9);

        // dry = 0.9 x 1.54 x 1.05 = 1.4553 m3
        assert!((result.dry_volume_m3 - 1.4553).abs() < 1e-9);

        // cement = (1/7) x 1.386 x 1.05 = 0.2079 m3
        assert!((result.cement_volume_m3 - 0.2079).abs() < 1e-9);

        // bags = 0.198 x 1440 / 50 x 1.05 = 5.98752
        assert!((result.cement_bags - 5.98752).abs() < 1e-9);
    }

    #[test]
    fn test_dry_volume_factor_pre_waste() {
        let mut input = slab_input();
        input.waste_factor_pct = 0.0;
        let result = calculate(&input).unwrap();
        assert!((result.dry_volume_m3 - result.wet_volume_m3 * 1.54).abs() < 1e-12);
    }

    #[test]
    fn test_partitions_sum_to_dry_volume() {
        // Waste applies uniformly to all three shares, so they still sum
        // to the (waste-adjusted) dry volume.
        let result = calculate(&slab_input()).unwrap();
        let sum = result.cement_volume_m3 + result.sand_volume_m3 + result.aggregate_volume_m3;
        assert!((sum - result.dry_volume_m3).abs() < 1e-9);
    }

    #[test]
    fn test_waste_scales_each_figure_independently() {
        let mut no_waste = slab_input();
        no_waste.waste_factor_pct = 0.0;
        let base = calculate(&no_waste).unwrap();

        let mut with_waste = slab_input();
        with_waste.waste_factor_pct = 12.0;
        let adjusted = calculate(&with_waste).unwrap();

        for (b, a) in [
            (base.wet_volume_m3, adjusted.wet_volume_m3),
            (base.dry_volume_m3, adjusted.dry_volume_m3),
            (base.cement_volume_m3, adjusted.cement_volume_m3),
            (base.sand_volume_m3, adjusted.sand_volume_m3),
            (base.aggregate_volume_m3, adjusted.aggregate_volume_m3),
            (base.cement_bags, adjusted.cement_bags),
        ] {
            assert!((a - b * 1.12).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut input = slab_input();
        input.length_m = -1.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DIMENSION");

        input = slab_input();
        input.height_m = 0.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_invalid_waste_factor() {
        let mut input = slab_input();
        input.waste_factor_pct = 101.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_WASTE_FACTOR");

        input.waste_factor_pct = -0.5;
        assert!(calculate(&input).is_err());

        // Boundary values are valid, not clamped away
        input.waste_factor_pct = 0.0;
        assert!(calculate(&input).is_ok());
        input.waste_factor_pct = 100.0;
        assert!(calculate(&input).is_ok());
    }

    #[test]
    fn test_two_part_mix_rejected() {
        let mut input = slab_input();
        input.concrete_mix = "1:2".to_string();
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MIX_RATIO");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = slab_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: ConcreteInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let result = calculate(&input).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("cement_bags"));
        let roundtrip: ConcreteQuantities = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}

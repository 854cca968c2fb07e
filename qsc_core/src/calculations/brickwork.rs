//! # Brickwork Quantity Calculation
//!
//! Estimates brick count and mortar quantities for a wall from its
//! dimensions, the brick module, and the mortar joint.
//!
//! ## Method
//!
//! - Bricks per unit face area follow from the joint-inclusive brick face
//!   (length + joint) x (height + joint)
//! - The layer count across the wall thickness is the rounded quotient of
//!   thickness over (brick width + joint), floored at one layer
//! - The mortar wet volume is the wall volume minus the waste-free brick
//!   volume, then waste-adjusted; dry mortar = wet x 1.33
//! - Mortar cement/sand split by the 2-part mix; bags from 1440 kg/m3 and
//!   50 kg per bag, rounded up
//!
//! ## Example
//!
//! ```rust
//! use qsc_core::calculations::brickwork::{BrickworkInput, calculate};
//!
//! let input = BrickworkInput {
//!     name: "Living Room Wall".to_string(),
//!     wall_length_m: 5.0,
//!     wall_height_m: 3.0,
//!     wall_thickness_m: 0.23,
//!     mortar_mix: "1:4".to_string(),
//!     brick_length_m: 0.19,
//!     brick_width_m: 0.09,
//!     brick_height_m: 0.09,
//!     mortar_joint_m: 0.01,
//!     waste_factor_pct: 5.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Bricks: {} Nos.", result.total_bricks);
//! println!("Mortar cement: {} bags", result.cement_mortar_bags);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::concrete::validate_waste_factor;
use crate::calculations::{CEMENT_BAG_KG, CEMENT_DENSITY_KG_M3};
use crate::errors::{CalcError, CalcResult};
use crate::mix::MixRatio;

/// Empirical dry-to-wet expansion factor for mortar. Fixed.
pub const MORTAR_DRY_VOLUME_FACTOR: f64 = 1.33;

/// Input parameters for a brickwork quantity calculation.
///
/// All dimensions in meters. The default Indian modular brick is
/// 0.190 x 0.090 x 0.090 with a 0.010 joint.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Living Room Wall",
///   "wall_length_m": 5.0,
///   "wall_height_m": 3.0,
///   "wall_thickness_m": 0.23,
///   "mortar_mix": "1:4",
///   "brick_length_m": 0.19,
///   "brick_width_m": 0.09,
///   "brick_height_m": 0.09,
///   "mortar_joint_m": 0.01,
///   "waste_factor_pct": 5.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickworkInput {
    /// User label for this wall (e.g., "Living Room Wall")
    pub name: String,

    /// Wall length in meters
    pub wall_length_m: f64,

    /// Wall height in meters
    pub wall_height_m: f64,

    /// Wall thickness in meters
    pub wall_thickness_m: f64,

    /// Volumetric mortar mix, cement:sand (e.g., "1:4")
    pub mortar_mix: String,

    /// Brick length in meters
    pub brick_length_m: f64,

    /// Brick width in meters
    pub brick_width_m: f64,

    /// Brick height in meters
    pub brick_height_m: f64,

    /// Mortar joint thickness in meters (0 allowed: dry stacking)
    pub mortar_joint_m: f64,

    /// Waste surplus percentage in [0, 100]
    pub waste_factor_pct: f64,
}

impl BrickworkInput {
    /// Validate input parameters.
    ///
    /// Wall and brick dimensions must be positive; the mortar joint may be
    /// zero but not negative. The mix string is validated in [`calculate`].
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("wall_length_m", self.wall_length_m),
            ("wall_height_m", self.wall_height_m),
            ("wall_thickness_m", self.wall_thickness_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_dimension(
                    field,
                    value.to_string(),
                    "Wall dimension must be positive",
                ));
            }
        }
        for (field, value) in [
            ("brick_length_m", self.brick_length_m),
            ("brick_width_m", self.brick_width_m),
            ("brick_height_m", self.brick_height_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_dimension(
                    field,
                    value.to_string(),
                    "Brick dimension must be positive",
                ));
            }
        }
        if !self.mortar_joint_m.is_finite() || self.mortar_joint_m < 0.0 {
            return Err(CalcError::invalid_dimension(
                "mortar_joint_m",
                self.mortar_joint_m.to_string(),
                "Mortar joint must be zero or positive",
            ));
        }
        validate_waste_factor(self.waste_factor_pct)?;
        Ok(())
    }
}

/// Calculated brickwork quantities.
///
/// Brick and bag counts are integers rounded up; volumes are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickworkQuantities {
    /// Bricks required, waste-adjusted and rounded up
    pub total_bricks: u64,

    /// Mortar wet volume in m3, waste-adjusted.
    ///
    /// Can go negative for pathological brick/joint combinations where the
    /// brick volume exceeds the wall volume; preserved as computed rather
    /// than clamped.
    pub total_mortar_wet_volume_m3: f64,

    /// Cement share of the dry mortar volume in m3
    pub cement_mortar_volume_m3: f64,

    /// Sand share of the dry mortar volume in m3
    pub sand_mortar_volume_m3: f64,

    /// Mortar cement demand in 50 kg bags, rounded up
    pub cement_mortar_bags: u64,
}

/// Calculate brickwork material quantities.
///
/// Pure function. The layer count across the wall thickness is floored at
/// one: a wall thinner than one brick course still needs a single layer.
///
/// # Returns
///
/// * `Ok(BrickworkQuantities)`
/// * `Err(CalcError)` - `InvalidDimension`, `InvalidWasteFactor`, or
///   `InvalidMixRatio`; no partial result is produced
///
/// # Example
///
/// ```rust
/// use qsc_core::calculations::brickwork::{BrickworkInput, calculate};
///
/// let input = BrickworkInput {
///     name: "Wall".to_string(),
///     wall_length_m: 5.0,
///     wall_height_m: 3.0,
///     wall_thickness_m: 0.23,
///     mortar_mix: "1:4".to_string(),
///     brick_length_m: 0.19,
///     brick_width_m: 0.09,
///     brick_height_m: 0.09,
///     mortar_joint_m: 0.01,
///     waste_factor_pct: 5.0,
/// };
/// let result = calculate(&input).unwrap();
/// assert_eq!(result.total_bricks, 1575);
/// ```
pub fn calculate(input: &BrickworkInput) -> CalcResult<BrickworkQuantities> {
    input.validate()?;

    let mortar_mix = MixRatio::parse(&input.mortar_mix, 2)?;

    let wall_volume = input.wall_length_m * input.wall_height_m * input.wall_thickness_m;

    // Bricks per square meter of wall face, joints included
    let effective_length = input.brick_length_m + input.mortar_joint_m;
    let effective_height = input.brick_height_m + input.mortar_joint_m;
    let bricks_per_sq_m = 1.0 / (effective_length * effective_height);

    // Courses across the thickness; a wall thinner than one course still
    // takes a single layer
    let layers_in_thickness = (input.wall_thickness_m
        / (input.brick_width_m + input.mortar_joint_m))
        .round()
        .max(1.0);

    let bricks_before_waste =
        bricks_per_sq_m * input.wall_length_m * input.wall_height_m * layers_in_thickness;

    let waste = 1.0 + input.waste_factor_pct / 100.0;
    let actual_bricks_required = bricks_before_waste * waste;

    // The mortar gap is isolated at the waste-free baseline: brick volume
    // is de-inflated before subtracting from the wall volume, and the gap
    // is waste-adjusted afterwards.
    let brick_volume = actual_bricks_required
        * input.brick_length_m
        * input.brick_width_m
        * input.brick_height_m;
    let mortar_wet_volume = wall_volume - brick_volume / waste;
    let mortar_wet_volume_with_waste = mortar_wet_volume * waste;

    let dry_mortar_volume = mortar_wet_volume_with_waste * MORTAR_DRY_VOLUME_FACTOR;

    let cement_mortar_volume = mortar_mix.share(0) * dry_mortar_volume;
    let sand_mortar_volume = mortar_mix.share(1) * dry_mortar_volume;
    let cement_mortar_bags = (cement_mortar_volume * CEMENT_DENSITY_KG_M3 / CEMENT_BAG_KG).ceil();

    Ok(BrickworkQuantities {
        total_bricks: actual_bricks_required.ceil() as u64,
        total_mortar_wet_volume_m3: mortar_wet_volume_with_waste,
        cement_mortar_volume_m3: cement_mortar_volume,
        sand_mortar_volume_m3: sand_mortar_volume,
        cement_mortar_bags: cement_mortar_bags as u64,
    })
}

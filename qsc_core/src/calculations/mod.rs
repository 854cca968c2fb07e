//! # Quantity Calculations
//!
//! This module contains the material quantity calculators. Each calculation
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Quantities` - Calculated results (JSON-serializable)
//! - `calculate(input) -> Result<*Quantities, CalcError>` - Pure function
//!
//! The calculators are stateless: no I/O, no clock, no shared state. Any
//! number of call sites may invoke them concurrently without coordination.
//!
//! ## Available Calculations
//!
//! - [`concrete`] - Cast concrete volumes, material split, cement bags
//! - [`brickwork`] - Brick count, mortar volumes, mortar cement bags

pub mod brickwork;
pub mod concrete;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CalcResult;

// Re-export commonly used types
pub use brickwork::{BrickworkInput, BrickworkQuantities};
pub use concrete::{ConcreteInput, ConcreteQuantities};

/// Cement bulk density in kg/m3. Fixed; stored results depend on it.
pub const CEMENT_DENSITY_KG_M3: f64 = 1440.0;

/// Mass of one cement bag in kg.
pub const CEMENT_BAG_KG: f64 = 50.0;

/// Enum wrapper for all calculation input types.
///
/// The serde tag values ("concrete", "bricks") are the discriminators used
/// in stored project files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Cast concrete element (slab, beam, footing)
    #[serde(rename = "concrete")]
    Concrete(ConcreteInput),
    /// Brick masonry wall
    #[serde(rename = "bricks")]
    Brickwork(BrickworkInput),
}

impl CalculationItem {
    /// Get the user-provided name for this calculation
    pub fn name(&self) -> &str {
        match self {
            CalculationItem::Concrete(c) => &c.name,
            CalculationItem::Brickwork(b) => &b.name,
        }
    }

    /// Get the calculation type discriminator as stored on disk
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Concrete(_) => "concrete",
            CalculationItem::Brickwork(_) => "bricks",
        }
    }

    /// Waste factor carried by the underlying input
    pub fn waste_factor_pct(&self) -> f64 {
        match self {
            CalculationItem::Concrete(c) => c.waste_factor_pct,
            CalculationItem::Brickwork(b) => b.waste_factor_pct,
        }
    }
}

/// Enum wrapper for the calculated payloads, one shape per calculation
/// type, discriminated the same way as [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    #[serde(rename = "concrete")]
    Concrete(ConcreteQuantities),
    #[serde(rename = "bricks")]
    Brickwork(BrickworkQuantities),
}

/// A calculation record as owned by a project: the input item plus, when
/// validation has succeeded, its calculated payload.
///
/// `id` is absent for new/unsaved records; the project store assigns a
/// stable UUID on first save.
///
/// Invariant: `calculated` is `Some` if and only if the most recent
/// [`evaluate`](Calculation::evaluate) of the current input succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Stable identifier, assigned by the store on first save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// The calculation input
    #[serde(flatten)]
    pub item: CalculationItem,

    /// The calculated payload, present only after successful evaluation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated: Option<CalculationOutput>,
}

impl Calculation {
    /// Create an unevaluated, unsaved record from an input item.
    pub fn new(item: CalculationItem) -> Self {
        Calculation {
            id: None,
            item,
            calculated: None,
        }
    }

    /// Run the calculator for this record's input and store the payload.
    ///
    /// On validation failure the payload is cleared and the error is
    /// returned - a record never keeps a stale payload for an input that
    /// no longer validates.
    pub fn evaluate(&mut self) -> CalcResult<()> {
        self.calculated = None;
        let output = match &self.item {
            CalculationItem::Concrete(input) => {
                CalculationOutput::Concrete(concrete::calculate(input)?)
            }
            CalculationItem::Brickwork(input) => {
                CalculationOutput::Brickwork(brickwork::calculate(input)?)
            }
        };
        self.calculated = Some(output);
        Ok(())
    }

    /// Create and evaluate in one step.
    pub fn evaluated(item: CalculationItem) -> CalcResult<Self> {
        let mut calc = Calculation::new(item);
        calc.evaluate()?;
        Ok(calc)
    }
}

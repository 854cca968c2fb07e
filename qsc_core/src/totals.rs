//! # Aggregation & Costing
//!
//! Sums calculation payloads into project-level material totals and prices
//! them with a fixed unit-price table. The reduction is pure and is always
//! recomputed from scratch - totals are never incrementally patched, so
//! they cannot drift from the records they summarize.

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculation, CalculationOutput};

/// Unit prices for the four tracked materials, in a single currency.
///
/// Supplied to the aggregation as configuration; the calculators never see
/// prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPriceTable {
    /// Price per 50 kg cement bag
    pub cement_per_bag: f64,
    /// Price per m3 of sand
    pub sand_per_m3: f64,
    /// Price per m3 of coarse aggregate
    pub aggregate_per_m3: f64,
    /// Price per brick
    pub brick_each: f64,
}

impl Default for MaterialPriceTable {
    fn default() -> Self {
        MaterialPriceTable {
            cement_per_bag: 400.0,
            sand_per_m3: 2500.0,
            aggregate_per_m3: 1800.0,
            brick_each: 12.0,
        }
    }
}

/// Material totals across a list of calculations, plus the estimated cost.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectTotals {
    /// Total cement in bags (concrete bags are fractional, mortar bags
    /// integral, so the sum is fractional)
    pub cement_bags: f64,
    /// Total sand in m3
    pub sand_m3: f64,
    /// Total coarse aggregate in m3
    pub aggregate_m3: f64,
    /// Total bricks
    pub bricks: u64,
    /// Totals priced by the supplied table
    pub estimated_cost: f64,
}

/// Aggregate evaluated calculations into project totals.
///
/// A single pass over the records, accumulating by variant:
///
/// - Concrete: cement bags, sand and aggregate volumes
/// - Brickwork: brick count, mortar cement bags, mortar sand volume
///
/// Records without a calculated payload contribute nothing. An empty list
/// yields all-zero totals (a project with nothing entered yet is not an
/// error). Inputs are not mutated.
///
/// # Example
///
/// ```rust
/// use qsc_core::totals::{aggregate, MaterialPriceTable};
///
/// let totals = aggregate(&[], &MaterialPriceTable::default());
/// assert_eq!(totals.estimated_cost, 0.0);
/// ```
pub fn aggregate(calculations: &[Calculation], prices: &MaterialPriceTable) -> ProjectTotals {
    let mut totals = ProjectTotals::default();

    for calc in calculations {
        match &calc.calculated {
            Some(CalculationOutput::Concrete(q)) => {
                totals.cement_bags += q.cement_bags;
                totals.sand_m3 += q.sand_volume_m3;
                totals.aggregate_m3 += q.aggregate_volume_m3;
            }
            Some(CalculationOutput::Brickwork(q)) => {
                totals.bricks += q.total_bricks;
                totals.cement_bags += q.cement_mortar_bags as f64;
                totals.sand_m3 += q.sand_mortar_volume_m3;
            }
            None => {}
        }
    }

    totals.estimated_cost = totals.cement_bags * prices.cement_per_bag
        + totals.sand_m3 * prices.sand_per_m3
        + totals.aggregate_m3 * prices.aggregate_per_m3
        + totals.bricks as f64 * prices.brick_each;

    totals
}

//! # CSV Report Rendering
//!
//! Renders a project's calculation list into the material-report CSV
//! consumed by spreadsheet users. One header row plus one row per
//! calculation; dimension fields that do not apply to a variant stay
//! empty.
//!
//! Decimal precision is fixed for output compatibility: bag counts to 1
//! decimal, volumes to 2 decimals, dimensions to 2 decimals.

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::{CalcError, CalcResult};
use crate::project::Project;
use crate::store::sanitize_name;

/// CSV header row
const CSV_HEADER: &str = "Project Name,Material Type,Item Name,Length (m),Width (m),Height (m),\
                          Thickness (m),Calculated Bricks (Nos),Calculated Cement (bags),\
                          Calculated Sand (m3),Calculated Aggregate (m3),\
                          Calculated Wet Volume (m3),Waste Factor (%)";

/// Render a project's calculations as a CSV report.
///
/// # Errors
///
/// `CalcError::Internal` when the project has no calculations - there is
/// nothing to report.
///
/// # Example
///
/// ```rust
/// use qsc_core::calculations::{Calculation, CalculationItem, ConcreteInput};
/// use qsc_core::project::Project;
/// use qsc_core::report::render_csv;
///
/// let mut project = Project::new("Villa");
/// project.add_calculation(
///     Calculation::evaluated(CalculationItem::Concrete(ConcreteInput {
///         name: "Slab".to_string(),
///         length_m: 2.0,
///         width_m: 3.0,
///         height_m: 0.15,
///         concrete_mix: "1:2:4".to_string(),
///         waste_factor_pct: 5.0,
///     }))
///     .unwrap(),
/// );
///
/// let csv = render_csv(&project).unwrap();
/// assert_eq!(csv.lines().count(), 2);
/// ```
pub fn render_csv(project: &Project) -> CalcResult<String> {
    if project.calculations.is_empty() {
        return Err(CalcError::Internal {
            message: "Project has no calculations to report".to_string(),
        });
    }

    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for calc in &project.calculations {
        let mut length = String::new();
        let mut width = String::new();
        let mut height = String::new();
        let mut thickness = String::new();
        let mut bricks = String::new();
        let mut cement_bags = String::new();
        let mut sand_m3 = String::new();
        let mut aggregate_m3 = String::new();
        let mut wet_volume_m3 = String::new();

        match &calc.item {
            CalculationItem::Concrete(input) => {
                length = format!("{:.2}", input.length_m);
                width = format!("{:.2}", input.width_m);
                height = format!("{:.2}", input.height_m);
            }
            CalculationItem::Brickwork(input) => {
                length = format!("{:.2}", input.wall_length_m);
                height = format!("{:.2}", input.wall_height_m);
                thickness = format!("{:.2}", input.wall_thickness_m);
            }
        }

        match &calc.calculated {
            Some(CalculationOutput::Concrete(q)) => {
                cement_bags = format!("{:.1}", q.cement_bags);
                sand_m3 = format!("{:.2}", q.sand_volume_m3);
                aggregate_m3 = format!("{:.2}", q.aggregate_volume_m3);
                wet_volume_m3 = format!("{:.2}", q.wet_volume_m3);
            }
            Some(CalculationOutput::Brickwork(q)) => {
                bricks = q.total_bricks.to_string();
                cement_bags = format!("{:.1}", q.cement_mortar_bags as f64);
                sand_m3 = format!("{:.2}", q.sand_mortar_volume_m3);
            }
            None => {}
        }

        csv.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",{},{},{},{},{},{},{},{},{},{}\n",
            project.name,
            calc.item.calc_type(),
            calc.item.name(),
            length,
            width,
            height,
            thickness,
            bricks,
            cement_bags,
            sand_m3,
            aggregate_m3,
            wet_volume_m3,
            calc.item.waste_factor_pct(),
        ));
    }

    Ok(csv)
}

/// File name for a project's report download, e.g.
/// `Villa_Duplex_Material_Report.csv`.
pub fn report_file_name(project_name: &str, extension: &str) -> String {
    format!(
        "{}_Material_Report.{}",
        sanitize_name(project_name),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{
        BrickworkInput, Calculation, CalculationItem, ConcreteInput,
    };

    fn project_with_both() -> Project {
        let mut project = Project::new("Villa Duplex");
        project.add_calculation(
            Calculation::evaluated(CalculationItem::Concrete(ConcreteInput {
                name: "Ground Floor Slab".to_string(),
                length_m: 2.0,
                width_m: 3.0,
                height_m: 0.15,
                concrete_mix: "1:2:4".to_string(),
                waste_factor_pct: 5.0,
            }))
            .unwrap(),
        );
        project.add_calculation(
            Calculation::evaluated(CalculationItem::Brickwork(BrickworkInput {
                name: "Living Room Wall".to_string(),
                wall_length_m: 5.0,
                wall_height_m: 3.0,
                wall_thickness_m: 0.23,
                mortar_mix: "1:4".to_string(),
                brick_length_m: 0.19,
                brick_width_m: 0.09,
                brick_height_m: 0.09,
                mortar_joint_m: 0.01,
                waste_factor_pct: 5.0,
            }))
            .unwrap(),
        );
        project
    }

    #[test]
    fn test_one_row_per_calculation_plus_header() {
        let csv = render_csv(&project_with_both()).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("Project Name,Material Type,Item Name"));
    }

    #[test]
    fn test_concrete_row_fields() {
        let csv = render_csv(&project_with_both()).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.starts_with("\"Villa Duplex\",\"concrete\",\"Ground Floor Slab\""));
        // Dimensions at 2 decimals, bags at 1 decimal, volumes at 2 decimals
        assert!(row.contains("2.00,3.00,0.15"));
        assert!(row.contains("6.0")); // 5.98752 bags -> 6.0
        assert!(row.contains("0.42")); // sand volume 0.4158 -> 0.42
        assert!(row.contains("0.83")); // aggregate volume 0.8316 -> 0.83
    }

    #[test]
    fn test_brickwork_row_fields() {
        let csv = render_csv(&project_with_both()).unwrap();
        let row = csv.lines().nth(2).unwrap();

        assert!(row.starts_with("\"Villa Duplex\",\"bricks\",\"Living Room Wall\""));
        assert!(row.contains("1575"));
        assert!(row.contains("10.0")); // mortar bags, 1 decimal
        // Width column is empty for walls: length,,height
        assert!(row.contains("5.00,,3.00,0.23"));
    }

    #[test]
    fn test_empty_project_rejected() {
        let project = Project::new("Empty");
        assert!(render_csv(&project).is_err());
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name("Villa Duplex", "csv"),
            "Villa_Duplex_Material_Report.csv"
        );
    }
}

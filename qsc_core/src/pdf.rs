//! # PDF Report Generation
//!
//! Generates the project material report as a PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via string substitution before compilation
//! - Output is raw PDF bytes (`Vec<u8>`), ready to write to disk or send
//!   over the wire
//!
//! ## Example
//!
//! ```rust,no_run
//! use qsc_core::calculations::{Calculation, CalculationItem, ConcreteInput};
//! use qsc_core::pdf::render_project_pdf;
//! use qsc_core::project::Project;
//! use qsc_core::totals::MaterialPriceTable;
//!
//! let mut project = Project::new("Villa Duplex");
//! project.add_calculation(
//!     Calculation::evaluated(CalculationItem::Concrete(ConcreteInput {
//!         name: "Slab".to_string(),
//!         length_m: 2.0,
//!         width_m: 3.0,
//!         height_m: 0.15,
//!         concrete_mix: "1:2:4".to_string(),
//!         waste_factor_pct: 5.0,
//!     }))
//!     .unwrap(),
//! );
//!
//! let pdf_bytes = render_project_pdf(&project, &MaterialPriceTable::default()).unwrap();
//! std::fs::write("material_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::CalculationOutput;
use crate::errors::{CalcError, CalcResult};
use crate::project::Project;
use crate::totals::MaterialPriceTable;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Load the bundled typst-assets fonts (text + math).
    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the project material report
const PROJECT_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[QSC Material Estimates]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{PROJECT_NAME}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 20pt, weight: "bold")[Project: {{PROJECT_NAME}}]
    #v(4pt)
    #text(size: 14pt)[Material Breakdown and Cost Estimate]
  ]
]

#v(12pt)

{{DESCRIPTION}}

#v(8pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Individual Calculations

{{CALCULATION_BLOCKS}}

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Overall Project Summary

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  [Total Cement], [{{TOTAL_CEMENT}} bags],
  [Total Sand], [{{TOTAL_SAND}} m#super[3]],
  [Total Aggregate], [{{TOTAL_AGGREGATE}} m#super[3]],
  [Total Bricks], [{{TOTAL_BRICKS}} Nos.],
)

#v(8pt)

#text(size: 16pt, weight: "bold")[Estimated Total Cost: Rs. {{TOTAL_COST}}]

#v(12pt)
#text(size: 9pt, fill: gray)[
  Note: Costs are estimates based on predefined prices and should be
  verified with actual market rates.
]
"##;

/// Render one calculation as a Typst block for the report body.
fn calculation_block(index: usize, calc: &crate::calculations::Calculation) -> String {
    let mut block = format!(
        "=== {}. {} ({}) - Waste: {}%\n\n",
        index + 1,
        calc.item.name(),
        calc.item.calc_type(),
        calc.item.waste_factor_pct(),
    );

    match &calc.calculated {
        Some(CalculationOutput::Concrete(q)) => {
            block.push_str(&format!(
                "- Wet Volume: {:.2} m#super[3]\n\
                 - Cement: {:.2} m#super[3] (approx. {:.1} bags)\n\
                 - Sand: {:.2} m#super[3]\n\
                 - Aggregate: {:.2} m#super[3]\n",
                q.wet_volume_m3, q.cement_volume_m3, q.cement_bags, q.sand_volume_m3,
                q.aggregate_volume_m3,
            ));
        }
        Some(CalculationOutput::Brickwork(q)) => {
            block.push_str(&format!(
                "- Bricks: {} Nos.\n\
                 - Mortar (Wet): {:.3} m#super[3]\n\
                 - Mortar Cement: {:.3} m#super[3] ({} bags)\n\
                 - Mortar Sand: {:.3} m#super[3]\n",
                q.total_bricks,
                q.total_mortar_wet_volume_m3,
                q.cement_mortar_volume_m3,
                q.cement_mortar_bags,
                q.sand_mortar_volume_m3,
            ));
        }
        None => {
            block.push_str("- Not calculated (invalid inputs)\n");
        }
    }

    block.push('\n');
    block
}

/// Render a project's material report to PDF bytes.
///
/// # Arguments
///
/// * `project` - The project with its calculation records
/// * `prices` - Unit prices used for the cost line
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError)` - Empty project, or Typst compilation/render failure
pub fn render_project_pdf(
    project: &Project,
    prices: &MaterialPriceTable,
) -> CalcResult<Vec<u8>> {
    if project.calculations.is_empty() {
        return Err(CalcError::Internal {
            message: "Project has no calculations to report".to_string(),
        });
    }

    let totals = project.totals(prices);

    let blocks: String = project
        .calculations
        .iter()
        .enumerate()
        .map(|(i, calc)| calculation_block(i, calc))
        .collect();

    let source = PROJECT_TEMPLATE
        .replace("{{PROJECT_NAME}}", &project.name)
        .replace("{{DESCRIPTION}}", &project.description)
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{CALCULATION_BLOCKS}}", &blocks)
        .replace("{{TOTAL_CEMENT}}", &format!("{:.1}", totals.cement_bags))
        .replace("{{TOTAL_SAND}}", &format!("{:.2}", totals.sand_m3))
        .replace("{{TOTAL_AGGREGATE}}", &format!("{:.2}", totals.aggregate_m3))
        .replace("{{TOTAL_BRICKS}}", &totals.bricks.to_string())
        .replace("{{TOTAL_COST}}", &format!("{:.2}", totals.estimated_cost));

    // Compile the Typst document
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    // Render to PDF
    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    Ok(pdf_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{BrickworkInput, Calculation, CalculationItem, ConcreteInput};

    fn sample_project() -> Project {
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
    fn test_calculation_block_formatting() {
        let project = sample_project();

        let concrete_block = calculation_block(0, &project.calculations[0]);
        assert!(concrete_block.contains("1. Ground Floor Slab (concrete)"));
        assert!(concrete_block.contains("approx. 6.0 bags"));

        let brick_block = calculation_block(1, &project.calculations[1]);
        assert!(brick_block.contains("2. Living Room Wall (bricks)"));
        assert!(brick_block.contains("Bricks: 1575 Nos."));
        assert!(brick_block.contains("(10 bags)"));
    }

    #[test]
    fn test_empty_project_rejected() {
        let project = Project::new("Empty");
        assert!(render_project_pdf(&project, &MaterialPriceTable::default()).is_err());
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let project = sample_project();
        let pdf = render_project_pdf(&project, &MaterialPriceTable::default()).unwrap();

        // PDF magic number
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pdf.len() > 1000);
    }
}

//! # Floor-Plan Import
//!
//! Converts wall/room geometry lists - as produced by the drawing surface
//! or by one of the built-in plan templates - into calculation records,
//! applying fixed site assumptions (standard wall height, mortar mix,
//! brick module). Plot-area and stair elements carry no material quantity
//! and are skipped.
//!
//! ## Example
//!
//! ```rust
//! use qsc_core::plan::{builtin_templates, calculations_from_plan, SiteAssumptions};
//!
//! let template = &builtin_templates()[0];
//! let elements = template.scale_to_plot(8.0, 11.0);
//! let calcs = calculations_from_plan(&elements, &SiteAssumptions::default());
//! assert!(!calcs.is_empty());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::{
    BrickworkInput, Calculation, CalculationItem, ConcreteInput,
};
use crate::geometry::{WallKind, WallSegment};

/// Finished thickness for external walls in meters
pub const EXTERNAL_WALL_THICKNESS_M: f64 = 0.20;

/// Finished thickness for internal walls in meters
pub const INTERNAL_WALL_THICKNESS_M: f64 = 0.15;

/// A wall element on the plan: axis-aligned rectangle plus its centerline
/// length and thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWall {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Centerline length in meters
    pub length: f64,
    /// Wall thickness in meters
    pub thickness: f64,
    pub name: String,
}

impl PlanWall {
    /// Build a plan wall from a drawn wall segment.
    pub fn from_segment(segment: &WallSegment, name: impl Into<String>) -> Self {
        let length = segment.length_m();
        PlanWall {
            x: segment.start.x.min(segment.end.x),
            y: segment.start.y.min(segment.end.y),
            width: (segment.end.x - segment.start.x).abs(),
            height: (segment.end.y - segment.start.y).abs(),
            length,
            thickness: segment.thickness_m,
            name: name.into(),
        }
    }
}

/// A room element on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRoom {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Floor area in m2
    pub area: f64,
    pub name: String,
}

/// A plain rectangle element (plot outline, stair segment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
}

/// One element of an exported plan, discriminated the same way the drawing
/// surface tags its exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanElement {
    ExternalWall(PlanWall),
    InternalWall(PlanWall),
    Room(PlanRoom),
    PlotArea(PlanRect),
    StairSegment(PlanRect),
}

impl PlanElement {
    /// The wall kind, for wall variants.
    pub fn wall_kind(&self) -> Option<WallKind> {
        match self {
            PlanElement::ExternalWall(_) => Some(WallKind::ExternalWall),
            PlanElement::InternalWall(_) => Some(WallKind::InternalWall),
            _ => None,
        }
    }
}

/// Fixed site assumptions applied to every imported plan element.
///
/// The drawing surface only captures plan geometry; everything else about
/// the construction comes from these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAssumptions {
    /// Wall height applied to every imported wall, in meters
    pub wall_height_m: f64,
    /// Mortar mix for imported brickwork
    pub mortar_mix: String,
    /// Brick length in meters
    pub brick_length_m: f64,
    /// Brick width in meters
    pub brick_width_m: f64,
    /// Brick height in meters
    pub brick_height_m: f64,
    /// Mortar joint thickness in meters
    pub mortar_joint_m: f64,
    /// Concrete mix for imported room flooring
    pub concrete_mix: String,
    /// Nominal flooring slab thickness for rooms, in meters
    pub flooring_thickness_m: f64,
    /// Waste factor for all imported calculations
    pub waste_factor_pct: f64,
}

impl Default for SiteAssumptions {
    fn default() -> Self {
        SiteAssumptions {
            wall_height_m: 3.0,
            mortar_mix: "1:4".to_string(),
            brick_length_m: 0.190,
            brick_width_m: 0.090,
            brick_height_m: 0.090,
            mortar_joint_m: 0.010,
            concrete_mix: "1:2:4".to_string(),
            flooring_thickness_m: 0.1,
            waste_factor_pct: 5.0,
        }
    }
}

/// Convert plan elements into evaluated calculation records.
///
/// Walls become brickwork calculations, rooms become flooring-slab
/// concrete calculations; plot outlines and stair segments are skipped,
/// as is any element whose derived input fails validation (e.g. a
/// zero-length wall left over from a stray click).
pub fn calculations_from_plan(
    elements: &[PlanElement],
    assumptions: &SiteAssumptions,
) -> Vec<Calculation> {
    let mut calculations = Vec::new();

    for element in elements {
        let item = match element {
            PlanElement::ExternalWall(wall) | PlanElement::InternalWall(wall) => {
                CalculationItem::Brickwork(BrickworkInput {
                    name: format!("{} - {:.2}m", wall.name, wall.length),
                    wall_length_m: wall.length,
                    wall_height_m: assumptions.wall_height_m,
                    wall_thickness_m: wall.thickness,
                    mortar_mix: assumptions.mortar_mix.clone(),
                    brick_length_m: assumptions.brick_length_m,
                    brick_width_m: assumptions.brick_width_m,
                    brick_height_m: assumptions.brick_height_m,
                    mortar_joint_m: assumptions.mortar_joint_m,
                    waste_factor_pct: assumptions.waste_factor_pct,
                })
            }
            PlanElement::Room(room) => CalculationItem::Concrete(ConcreteInput {
                name: format!("{} - Flooring", room.name),
                length_m: room.width,
                width_m: room.height,
                height_m: assumptions.flooring_thickness_m,
                concrete_mix: assumptions.concrete_mix.clone(),
                waste_factor_pct: assumptions.waste_factor_pct,
            }),
            PlanElement::PlotArea(_) | PlanElement::StairSegment(_) => continue,
        };

        if let Ok(calc) = Calculation::evaluated(item) {
            calculations.push(calc);
        }
    }

    calculations
}

/// A fixed plan layout drawn for a native plot size, scalable to the
/// user's plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTemplate {
    pub name: String,
    /// Native plot width in meters
    pub plot_width_m: f64,
    /// Native plot height in meters
    pub plot_height_m: f64,
    pub elements: Vec<PlanElement>,
}

impl PlanTemplate {
    /// Scale this template's elements to a requested plot size.
    ///
    /// X and Y scale independently. Wall lengths scale along the wall
    /// axis; wall thickness snaps to the fixed finished values rather
    /// than scaling (a stretched plan still uses standard walls). Room
    /// areas are recomputed from the scaled extents.
    pub fn scale_to_plot(&self, plot_width_m: f64, plot_height_m: f64) -> Vec<PlanElement> {
        let scale_x = plot_width_m / self.plot_width_m;
        let scale_y = plot_height_m / self.plot_height_m;

        self.elements
            .iter()
            .map(|element| match element {
                PlanElement::ExternalWall(wall) | PlanElement::InternalWall(wall) => {
                    let kind = element.wall_kind().unwrap_or(WallKind::InternalWall);
                    let horizontal = wall.width > wall.height;
                    let length = if horizontal {
                        wall.width * scale_x
                    } else {
                        wall.height * scale_y
                    };
                    let thickness = match kind {
                        WallKind::ExternalWall => EXTERNAL_WALL_THICKNESS_M,
                        WallKind::InternalWall => INTERNAL_WALL_THICKNESS_M,
                    };
                    let scaled = PlanWall {
                        x: wall.x * scale_x,
                        y: wall.y * scale_y,
                        width: if horizontal { length } else { thickness },
                        height: if horizontal { thickness } else { length },
                        length,
                        thickness,
                        name: wall.name.clone(),
                    };
                    match kind {
                        WallKind::ExternalWall => PlanElement::ExternalWall(scaled),
                        WallKind::InternalWall => PlanElement::InternalWall(scaled),
                    }
                }
                PlanElement::Room(room) => {
                    let width = room.width * scale_x;
                    let height = room.height * scale_y;
                    PlanElement::Room(PlanRoom {
                        x: room.x * scale_x,
                        y: room.y * scale_y,
                        width,
                        height,
                        area: width * height,
                        name: room.name.clone(),
                    })
                }
                PlanElement::PlotArea(rect) => PlanElement::PlotArea(scale_rect(rect, scale_x, scale_y)),
                PlanElement::StairSegment(rect) => {
                    PlanElement::StairSegment(scale_rect(rect, scale_x, scale_y))
                }
            })
            .collect()
    }
}

fn scale_rect(rect: &PlanRect, scale_x: f64, scale_y: f64) -> PlanRect {
    PlanRect {
        x: rect.x * scale_x,
        y: rect.y * scale_y,
        width: rect.width * scale_x,
        height: rect.height * scale_y,
        name: rect.name.clone(),
    }
}

fn wall(
    kind: WallKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    length: f64,
    thickness: f64,
    name: &str,
) -> PlanElement {
    let wall = PlanWall {
        x,
        y,
        width,
        height,
        length,
        thickness,
        name: name.to_string(),
    };
    match kind {
        WallKind::ExternalWall => PlanElement::ExternalWall(wall),
        WallKind::InternalWall => PlanElement::InternalWall(wall),
    }
}

fn room(x: f64, y: f64, width: f64, height: f64, name: &str) -> PlanElement {
    PlanElement::Room(PlanRoom {
        x,
        y,
        width,
        height,
        area: width * height,
        name: name.to_string(),
    })
}

fn stair(x: f64, y: f64, width: f64, height: f64, name: &str) -> PlanElement {
    PlanElement::StairSegment(PlanRect {
        x,
        y,
        width,
        height,
        name: name.to_string(),
    })
}

/// The built-in plan templates, in their native plot sizes.
static TEMPLATES: Lazy<Vec<PlanTemplate>> = Lazy::new(|| {
    use WallKind::{ExternalWall as Ext, InternalWall as Int};

    vec![
        PlanTemplate {
            name: "Simple 1BHK Template".to_string(),
            plot_width_m: 7.0,
            plot_height_m: 10.0,
            elements: vec![
                wall(Ext, 0.0, 0.0, 7.0, 0.20, 7.0, 0.20, "Top Ext Wall"),
                wall(Ext, 0.0, 9.80, 7.0, 0.20, 7.0, 0.20, "Bottom Ext Wall"),
                wall(Ext, 0.0, 0.20, 0.20, 9.60, 9.60, 0.20, "Left Ext Wall"),
                wall(Ext, 6.80, 0.20, 0.20, 9.60, 9.60, 0.20, "Right Ext Wall"),
                wall(Int, 0.20, 6.00, 6.60, 0.15, 6.60, 0.15, "Bedroom-Living Wall"),
                wall(Int, 4.00, 0.20, 0.15, 5.80, 5.80, 0.15, "Bathroom-Kitchen Wall"),
                wall(Int, 4.00, 6.15, 0.15, 3.65, 3.65, 0.15, "Living-Dining Wall"),
                room(0.20, 0.20, 3.80, 5.80, "Bedroom"),
                room(4.15, 0.20, 2.65, 5.80, "Bathroom"),
                room(0.20, 6.15, 3.80, 3.65, "Living Area"),
                room(4.15, 6.15, 2.65, 3.65, "Kitchen/Dining"),
            ],
        },
        PlanTemplate {
            name: "Standard 2BHK Template".to_string(),
            plot_width_m: 10.0,
            plot_height_m: 12.0,
            elements: vec![
                wall(Ext, 0.0, 0.0, 10.0, 0.20, 10.0, 0.20, "Top Ext Wall"),
                wall(Ext, 0.0, 11.80, 10.0, 0.20, 10.0, 0.20, "Bottom Ext Wall"),
                wall(Ext, 0.0, 0.20, 0.20, 11.60, 11.60, 0.20, "Left Ext Wall"),
                wall(Ext, 9.80, 0.20, 0.20, 11.60, 11.60, 0.20, "Right Ext Wall"),
                wall(Int, 0.20, 6.00, 9.60, 0.15, 9.60, 0.15, "Central Horizontal Divide"),
                wall(Int, 4.50, 0.20, 0.15, 3.80, 3.80, 0.15, "Bedroom1-Bath1 Wall"),
                wall(Int, 7.00, 4.15, 0.15, 7.65, 7.65, 0.15, "Bedroom2-Living Wall"),
                room(0.20, 0.20, 4.30, 3.80, "Bedroom 1"),
                room(4.65, 0.20, 5.15, 3.80, "Kitchen"),
                room(0.20, 4.15, 6.80, 7.65, "Living/Dining"),
                room(7.15, 4.15, 2.65, 7.65, "Bedroom 2"),
            ],
        },
        PlanTemplate {
            name: "Combined 2BHK + Stairs Template".to_string(),
            plot_width_m: 12.0,
            plot_height_m: 12.0,
            elements: vec![
                wall(Ext, 0.0, 0.0, 12.0, 0.20, 12.0, 0.20, "Top Ext Wall"),
                wall(Ext, 0.0, 11.80, 12.0, 0.20, 12.0, 0.20, "Bottom Ext Wall"),
                wall(Ext, 0.0, 0.20, 0.20, 11.60, 11.60, 0.20, "Left Ext Wall"),
                wall(Ext, 11.80, 0.20, 0.20, 11.60, 11.60, 0.20, "Right Ext Wall"),
                wall(Int, 0.20, 6.00, 11.60, 0.15, 11.60, 0.15, "Central Horizontal Divide"),
                wall(Int, 4.00, 0.20, 0.15, 5.80, 5.80, 0.15, "Bedroom1-Living Wall"),
                wall(Int, 8.00, 0.20, 0.15, 5.80, 5.80, 0.15, "Kitchen-Stairwell Wall"),
                wall(Int, 8.00, 6.15, 0.15, 5.65, 5.65, 0.15, "Bedroom2-Bathroom Wall"),
                room(0.20, 0.20, 3.80, 5.80, "Bedroom 1"),
                room(4.15, 0.20, 3.85, 5.80, "Living Area"),
                room(8.15, 0.20, 3.65, 5.80, "Kitchen"),
                room(0.20, 6.15, 7.80, 5.65, "Stairwell Access"),
                room(8.15, 6.15, 3.65, 5.65, "Bedroom 2"),
                stair(0.50, 6.50, 2.00, 1.00, "Stair Bottom"),
                stair(0.50, 7.80, 2.00, 1.00, "Stair Landing"),
                stair(0.50, 9.10, 2.00, 1.00, "Stair Top"),
            ],
        },
    ]
});

/// The built-in plan templates.
pub fn builtin_templates() -> &'static [PlanTemplate] {
    &TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_wall_and_room_become_calculations() {
        let elements = vec![
            wall(WallKind::ExternalWall, 0.0, 0.0, 7.0, 0.2, 7.0, 0.2, "Front Wall"),
            room(0.2, 0.2, 3.8, 5.8, "Bedroom"),
            PlanElement::PlotArea(PlanRect {
                x: 0.0,
                y: 0.0,
                width: 7.0,
                height: 10.0,
                name: "Plot".to_string(),
            }),
        ];

        let calcs = calculations_from_plan(&elements, &SiteAssumptions::default());
        assert_eq!(calcs.len(), 2);

        assert_eq!(calcs[0].item.calc_type(), "bricks");
        assert_eq!(calcs[0].item.name(), "Front Wall - 7.00m");
        assert!(calcs[0].calculated.is_some());

        assert_eq!(calcs[1].item.calc_type(), "concrete");
        assert_eq!(calcs[1].item.name(), "Bedroom - Flooring");
        assert!(calcs[1].calculated.is_some());
    }

    #[test]
    fn test_site_assumptions_applied() {
        let elements = vec![wall(
            WallKind::InternalWall,
            0.0,
            0.0,
            5.0,
            0.15,
            5.0,
            0.15,
            "Wall",
        )];
        let calcs = calculations_from_plan(&elements, &SiteAssumptions::default());

        match &calcs[0].item {
            CalculationItem::Brickwork(input) => {
                assert_eq!(input.wall_height_m, 3.0);
                assert_eq!(input.mortar_mix, "1:4");
                assert_eq!(input.brick_length_m, 0.190);
                assert_eq!(input.mortar_joint_m, 0.010);
                assert_eq!(input.waste_factor_pct, 5.0);
            }
            _ => panic!("expected brickwork"),
        }
    }

    #[test]
    fn test_degenerate_wall_skipped() {
        let elements = vec![wall(
            WallKind::InternalWall,
            1.0,
            1.0,
            0.0,
            0.15,
            0.0,
            0.15,
            "Stray Click",
        )];
        let calcs = calculations_from_plan(&elements, &SiteAssumptions::default());
        assert!(calcs.is_empty());
    }

    #[test]
    fn test_from_segment() {
        let segment = WallSegment {
            start: Point::new(0.0, 0.0),
            end: Point::new(3.0, 4.0),
            thickness_m: 0.15,
            kind: WallKind::InternalWall,
        };
        let plan_wall = PlanWall::from_segment(&segment, "Drawn Wall");
        assert!((plan_wall.length - 5.0).abs() < 1e-12);
        assert_eq!(plan_wall.thickness, 0.15);
    }

    #[test]
    fn test_builtin_templates() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0].name, "Simple 1BHK Template");

        // Every template imports to a non-empty calculation list
        for template in templates {
            let calcs = calculations_from_plan(&template.elements, &SiteAssumptions::default());
            assert!(!calcs.is_empty());
        }
    }

    #[test]
    fn test_scale_preserves_wall_thickness() {
        let template = &builtin_templates()[0];
        let scaled = template.scale_to_plot(14.0, 20.0);

        for element in &scaled {
            match element {
                PlanElement::ExternalWall(wall) => {
                    assert_eq!(wall.thickness, EXTERNAL_WALL_THICKNESS_M)
                }
                PlanElement::InternalWall(wall) => {
                    assert_eq!(wall.thickness, INTERNAL_WALL_THICKNESS_M)
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_scale_doubles_wall_length_and_room_area() {
        let template = &builtin_templates()[0];
        let scaled = template.scale_to_plot(14.0, 10.0); // 2x in X only

        // The top external wall is horizontal: length doubles
        match (&template.elements[0], &scaled[0]) {
            (PlanElement::ExternalWall(orig), PlanElement::ExternalWall(scaled)) => {
                assert!((scaled.length - orig.length * 2.0).abs() < 1e-12);
            }
            _ => panic!("expected external walls"),
        }

        // Rooms scale area by scale_x * scale_y = 2
        let (orig_room, scaled_room) = match (&template.elements[7], &scaled[7]) {
            (PlanElement::Room(a), PlanElement::Room(b)) => (a, b),
            _ => panic!("expected rooms"),
        };
        assert!((scaled_room.area - orig_room.area * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_stairs_skipped_on_import() {
        let template = &builtin_templates()[2];
        let calcs = calculations_from_plan(&template.elements, &SiteAssumptions::default());

        // 8 walls + 5 rooms; 3 stair segments contribute nothing
        assert_eq!(calcs.len(), 13);
    }

    #[test]
    fn test_element_serialization_tags() {
        let element = wall(WallKind::ExternalWall, 0.0, 0.0, 7.0, 0.2, 7.0, 0.2, "W");
        let json = serde_json::to_string(&element).unwrap();
        assert!(json.contains("\"type\":\"external_wall\""));

        let roundtrip: PlanElement = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, element);
    }
}

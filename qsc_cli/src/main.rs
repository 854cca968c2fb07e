//! # QSC CLI Application
//!
//! Terminal front end for the quantity survey calculator. Prompts for
//! element dimensions, runs the engine, and prints per-element quantities
//! plus running project totals.

use std::io::{self, BufRead, Write};

use qsc_core::calculations::{
    brickwork, concrete, BrickworkInput, Calculation, CalculationItem, CalculationOutput,
    ConcreteInput,
};
use qsc_core::project::Project;
use qsc_core::totals::MaterialPriceTable;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("QSC - Construction Material Quantity Estimator");
    println!("==============================================");
    println!();

    let project_name = prompt_str("Project name [Quick Estimate]: ", "Quick Estimate");
    let mut project = Project::new(project_name);
    let prices = MaterialPriceTable::default();

    loop {
        println!();
        let choice = prompt_str("Add calculation - concrete, bricks, or done [done]: ", "done");

        match choice.as_str() {
            "concrete" => add_concrete(&mut project),
            "bricks" => add_brickwork(&mut project),
            "done" => break,
            other => println!("Unknown choice '{}'.", other),
        }
    }

    if project.calculation_count() == 0 {
        println!();
        println!("No calculations entered.");
        return;
    }

    let totals = project.totals(&prices);

    println!();
    println!("═══════════════════════════════════════");
    println!("  PROJECT MATERIAL SUMMARY");
    println!("═══════════════════════════════════════");
    println!();
    println!("  Project:         {}", project.name);
    println!("  Calculations:    {}", project.calculation_count());
    println!();
    println!("  Total Cement:    {:.1} bags", totals.cement_bags);
    println!("  Total Sand:      {:.2} m³", totals.sand_m3);
    println!("  Total Aggregate: {:.2} m³", totals.aggregate_m3);
    println!("  Total Bricks:    {} Nos.", totals.bricks);
    println!();
    println!("  Estimated Cost:  Rs. {:.2}", totals.estimated_cost);
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for API/automation use):");
    if let Ok(json) = serde_json::to_string_pretty(&project) {
        println!("{}", json);
    }
}

fn add_concrete(project: &mut Project) {
    println!();
    println!("Concrete element (slab, beam, footing)");

    let input = ConcreteInput {
        name: prompt_str("  Name [Concrete Calculation]: ", "Concrete Calculation"),
        length_m: prompt_f64("  Length (m) [2.0]: ", 2.0),
        width_m: prompt_f64("  Width (m) [3.0]: ", 3.0),
        height_m: prompt_f64("  Height (m) [0.15]: ", 0.15),
        concrete_mix: prompt_str("  Mix cement:sand:aggregate [1:2:4]: ", "1:2:4"),
        waste_factor_pct: prompt_f64("  Waste factor (%) [5]: ", 5.0),
    };

    match concrete::calculate(&input) {
        Ok(result) => {
            println!();
            println!("  Wet Volume:  {:.2} m³", result.wet_volume_m3);
            println!(
                "  Cement:      {:.2} m³ (~ {:.1} bags)",
                result.cement_volume_m3, result.cement_bags
            );
            println!("  Sand:        {:.2} m³", result.sand_volume_m3);
            println!("  Aggregate:   {:.2} m³", result.aggregate_volume_m3);

            let mut calc = Calculation::new(CalculationItem::Concrete(input));
            calc.calculated = Some(CalculationOutput::Concrete(result));
            project.add_calculation(calc);
        }
        Err(e) => print_error(&e),
    }
}

fn add_brickwork(project: &mut Project) {
    println!();
    println!("Brick masonry wall");

    let input = BrickworkInput {
        name: prompt_str("  Name [Brickwork Calculation]: ", "Brickwork Calculation"),
        wall_length_m: prompt_f64("  Wall length (m) [5.0]: ", 5.0),
        wall_height_m: prompt_f64("  Wall height (m) [3.0]: ", 3.0),
        wall_thickness_m: prompt_f64("  Wall thickness (m) [0.23]: ", 0.23),
        mortar_mix: prompt_str("  Mortar mix cement:sand [1:4]: ", "1:4"),
        brick_length_m: prompt_f64("  Brick length (m) [0.190]: ", 0.190),
        brick_width_m: prompt_f64("  Brick width (m) [0.090]: ", 0.090),
        brick_height_m: prompt_f64("  Brick height (m) [0.090]: ", 0.090),
        mortar_joint_m: prompt_f64("  Mortar joint (m) [0.010]: ", 0.010),
        waste_factor_pct: prompt_f64("  Waste factor (%) [5]: ", 5.0),
    };

    match brickwork::calculate(&input) {
        Ok(result) => {
            println!();
            println!("  Bricks:        {} Nos.", result.total_bricks);
            println!(
                "  Mortar (Wet):  {:.3} m³",
                result.total_mortar_wet_volume_m3
            );
            println!(
                "  Mortar Cement: {:.3} m³ (~ {} bags)",
                result.cement_mortar_volume_m3, result.cement_mortar_bags
            );
            println!("  Mortar Sand:   {:.3} m³", result.sand_mortar_volume_m3);

            let mut calc = Calculation::new(CalculationItem::Brickwork(input));
            calc.calculated = Some(CalculationOutput::Brickwork(result));
            project.add_calculation(calc);
        }
        Err(e) => print_error(&e),
    }
}

fn print_error(e: &qsc_core::CalcError) {
    eprintln!();
    eprintln!("  Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!("  Error JSON:");
        eprintln!("{}", json);
    }
}

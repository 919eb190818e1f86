//! # Polewright CLI
//!
//! Terminal front-end for the attachment analysis engine. Prompts for the
//! job inputs, runs the analysis, and prints both a human-readable summary
//! and the JSON report for API use.

use std::io::{self, BufRead, Write};

use pole_core::calculations::analysis::{compute_analysis, AnalysisInput, ConstructionType};
use pole_core::units::{format_feet_inches, MeasurementStyle};

fn prompt(text: &str, default: &str) -> String {
    print!("{}", text);
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

fn prompt_f64(text: &str, default: f64) -> f64 {
    prompt(text, &default.to_string()).parse().unwrap_or(default)
}

fn fmt_ft(value: f64) -> String {
    format_feet_inches(value, MeasurementStyle::TickMarks)
}

fn main() {
    println!("Polewright - Pole Attachment Analysis");
    println!("=====================================");
    println!();

    let pole_height = prompt("Pole height [45]: ", "45");
    let pole_class = prompt("Pole class [Class 3]: ", "Class 3");
    let existing_power_height = prompt("Existing power height [30' 0\"]: ", "30' 0\"");
    let span_length_ft = prompt_f64("Span length (ft) [200]: ", 200.0);
    let wind_speed_mph = prompt_f64("Wind speed (mph) [90]: ", 90.0);

    let input = AnalysisInput {
        pole_height,
        pole_class,
        construction: ConstructionType::Existing,
        existing_power_height,
        span_length_ft: Some(span_length_ft),
        wind_speed_mph: Some(wind_speed_mph),
        ..Default::default()
    };

    println!();
    match compute_analysis(&input) {
        Ok(report) => {
            println!("═══════════════════════════════════════");
            println!("  ATTACHMENT ANALYSIS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Pole:");
            println!("  Length:       {}", fmt_ft(report.pole.input_height_ft));
            println!("  Buried:       {}", fmt_ft(report.pole.buried_ft));
            println!("  Above ground: {}", fmt_ft(report.pole.above_ground_ft));
            println!("  Class:        {}", report.pole.class_label);
            println!();
            println!("Proposed attachment:");
            println!("  Cable:   {}", report.cable.label);
            println!("  Height:  {}", fmt_ft(report.proposed_attach_ft));
            println!(
                "  Governs: {} ({})",
                report.controlling.basis, report.controlling.detail
            );
            if let Some(span) = &report.span {
                println!();
                println!("Span loading:");
                println!("  Span:    {:.0} ft", span.span_ft);
                println!("  Sag:     {:.2} ft", span.sag_ft);
                println!("  Midspan: {}", fmt_ft(span.midspan_ft));
            }
            if let Some(guy) = &report.guy {
                println!();
                println!("Guying:");
                println!("  Required: {}", if guy.required { "yes" } else { "no" });
                println!("  Tension:  {:.0} lb at {:.0}°", guy.tension_lb, guy.angle_deg);
                println!("  Lead:     {:.1} ft", guy.lead_distance_ft);
            }
            if !report.warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &report.warnings {
                    println!("  ! {}", warning);
                }
            }
            if !report.notes.is_empty() {
                println!();
                println!("Notes:");
                for note in &report.notes {
                    println!("  - {}", note);
                }
            }
            println!();
            println!("═══════════════════════════════════════");
            println!("  ESTIMATED COST: ${:.0}", report.total_cost);
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&report) {
                println!("{}", json);
            }
        }
        Err(errors) => {
            eprintln!("Input errors:");
            for (field, message) in &errors.fields {
                eprintln!("  {}: {}", field, message);
            }
            if let Ok(json) = serde_json::to_string_pretty(&errors) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}

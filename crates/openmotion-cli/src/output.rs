//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use openmotion_filters::{FilterConfig, FilterMode};
use serde_json::json;

use crate::commands::replay::ReplaySummary;
use crate::commands::simulate::SimulationReport;
use crate::config_file::LoadedConfig;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print a filter configuration
pub fn print_config(config: &FilterConfig, json: bool) -> anyhow::Result<()> {
    if json {
        let output = json!({
            "success": true,
            "config": config,
            "effective": {
                "smoothingFactor": config.smoothing_factor(),
                "predictionFactor": config.prediction_factor(),
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Filter Configuration:".bold());
    println!("  Mode: {}", mode_label(config.mode()));
    println!("  Amount: {:.3}", config.amount());
    println!("  Smooth min: {}", config.smooth_min());
    println!("  Predict min: {}", config.predict_min());
    println!("  Predict multiplier: {}", config.predict_multiplier());
    println!("  Predict buffer: {}", config.predict_buffer());
    match config.mode() {
        FilterMode::Smoothing => {
            println!("  Effective smoothing factor: {:.3} /s", config.smoothing_factor());
        }
        FilterMode::Prediction => {
            println!("  Effective prediction factor: {:.3}", config.prediction_factor());
        }
        FilterMode::None => {}
    }
    Ok(())
}

/// Print a validation result
pub fn print_validation(loaded: &LoadedConfig, json: bool) -> anyhow::Result<()> {
    if json {
        let output = json!({
            "success": true,
            "config": loaded.config,
            "adjustments": loaded.adjustments,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if loaded.adjustments.is_empty() {
        println!("{} Configuration is valid", "✓".green());
    } else {
        println!(
            "{} Configuration normalized ({} value(s) adjusted):",
            "!".yellow().bold(),
            loaded.adjustments.len()
        );
        for adjustment in &loaded.adjustments {
            println!("  {adjustment}");
        }
    }
    print_config(&loaded.config, false)
}

/// Print a replay summary. When filtered records went to stdout the summary
/// goes to stderr.
pub fn print_replay_summary(summary: &ReplaySummary, json: bool, to_stderr: bool) -> anyhow::Result<()> {
    let text = if json {
        serde_json::to_string_pretty(&json!({ "success": true, "summary": summary }))?
    } else {
        let mut lines = vec![format!(
            "{} Replayed {} record(s) in {} mode",
            "✓".green(),
            summary.records,
            summary.mode
        )];
        for tracker in &summary.trackers {
            lines.push(format!(
                "  tracker {}: filtered {}, passthrough {}, rejected {}, out of order {}",
                tracker.tracker, tracker.filtered, tracker.passthrough, tracker.rejected, tracker.out_of_order
            ));
        }
        lines.join("\n")
    };

    if to_stderr {
        eprintln!("{text}");
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Print a simulation report
pub fn print_simulation(report: &SimulationReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "success": true, "simulation": report }))?);
        return Ok(());
    }

    println!(
        "{} {} at {} Hz, {} deg/s ({:.3} deg per step)",
        "Simulation:".bold(),
        mode_label(report.mode),
        report.rate_hz,
        report.degrees_per_second,
        report.step_delta_deg
    );
    println!("  {:>5} {:>12} {:>12} {:>10}", "step", "raw yaw", "filtered", "lead");
    for row in &report.rows {
        println!(
            "  {:>5} {:>12.3} {:>12.3} {:>10.3}",
            row.step, row.raw_yaw_deg, row.filtered_yaw_deg, row.lead_deg
        );
    }
    println!(
        "  Final lead: {:.3} deg (expected steady state {:.3} deg)",
        report.final_lead_deg, report.expected_lead_deg
    );
    Ok(())
}

fn mode_label(mode: FilterMode) -> ColoredString {
    match mode {
        FilterMode::None => mode.as_str().dimmed(),
        FilterMode::Smoothing => mode.as_str().cyan(),
        FilterMode::Prediction => mode.as_str().green(),
    }
}

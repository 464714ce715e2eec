//! Insta snapshot tests for the persisted configuration shape.

use openmotion_filters::prelude::*;

#[test]
fn default_config_json_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&FilterConfig::default())?;
    insta::assert_snapshot!("default_config_json", json);
    Ok(())
}

#[test]
fn lenient_config_normalized_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let config: FilterConfig =
        serde_json::from_str(r#"{"mode": "SMOOTHING", "amount": 0.75, "predictBuffer": 3.4}"#)?;
    let json = serde_json::to_string_pretty(&config)?;
    insta::assert_snapshot!("lenient_config_normalized", json);
    Ok(())
}

#[test]
fn adjustment_report_snapshot() {
    let (_config, report) = FilterConfig::validate_with_report(RawFilterConfig {
        mode: Some("kalman".into()),
        amount: Some(50.0),
        smooth_min: Some(f64::NAN),
        predict_min: Some(-5.0),
        predict_multiplier: None,
        predict_buffer: Some(0.0),
    });
    let lines: Vec<String> = report.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!("adjustment_report", lines.join("\n"));
}

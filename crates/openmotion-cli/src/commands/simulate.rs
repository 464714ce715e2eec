//! Synthetic constant-rate rotation through the filters

use std::time::Duration;

use anyhow::Result;
use openmotion_filters::{FilterMode, Rotation, RotationSample};
use openmotion_trackers::{TrackerFilterBinding, TrackerId};
use serde::Serialize;
use tracing::info;

use crate::commands::SimulateArgs;
use crate::config_file;
use crate::error::CliError;
use crate::output;

/// One simulated step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRow {
    pub step: u32,
    pub timestamp_ns: u64,
    pub raw_yaw_deg: f64,
    pub filtered_yaw_deg: f64,
    pub lead_deg: f64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub mode: FilterMode,
    pub rate_hz: f64,
    pub degrees_per_second: f64,
    pub step_delta_deg: f64,
    /// Steady-state lead (positive) or lag (negative) the filter should settle at
    pub expected_lead_deg: f64,
    pub final_lead_deg: f64,
    pub rows: Vec<SimulationRow>,
}

/// Execute the simulate command
pub fn execute(args: &SimulateArgs, json: bool) -> Result<()> {
    let config = config_file::load_or_default(args.config.as_deref())?;
    let report = simulate(args, config)?;
    output::print_simulation(&report, json)?;
    Ok(())
}

/// Feed a constant yaw rate through one tracker binding.
pub fn simulate(args: &SimulateArgs, config: openmotion_filters::FilterConfig) -> Result<SimulationReport, CliError> {
    if !(args.rate_hz.is_finite() && args.rate_hz > 0.0) {
        return Err(CliError::InvalidArgument(format!("rate must be positive, got {}", args.rate_hz)));
    }
    if !args.degrees_per_second.is_finite() {
        return Err(CliError::InvalidArgument("degrees per second must be finite".into()));
    }

    let tick = Duration::try_from_secs_f64(args.rate_hz.recip())
        .map_err(|e| CliError::InvalidArgument(format!("rate {} Hz: {e}", args.rate_hz)))?;
    let tick_ns = u64::try_from(tick.as_nanos())
        .ok()
        .filter(|&ns| ns > 0)
        .ok_or_else(|| CliError::InvalidArgument(format!("rate {} Hz is out of range", args.rate_hz)))?;

    info!(mode = %config.mode(), rate_hz = args.rate_hz, steps = args.steps, "Simulating constant yaw");

    let (mut binding, _control) = TrackerFilterBinding::new(TrackerId::new(0), true, config);
    let radians_per_ns = args.degrees_per_second.to_radians() / 1e9;

    let mut rows = Vec::with_capacity(args.steps.try_into().unwrap_or(0));
    let mut timestamp_ns = 0u64;
    for step in 0..args.steps {
        let yaw = (radians_per_ns * timestamp_ns as f64) as f32;
        let sample = RotationSample::from_unit(Rotation::from_euler_angles(0.0, 0.0, yaw), timestamp_ns)
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;
        let raw = sample.rotation();
        let filtered = binding.update(&sample);

        rows.push(SimulationRow {
            step,
            timestamp_ns,
            raw_yaw_deg: yaw_deg(&raw),
            filtered_yaw_deg: yaw_deg(&filtered),
            lead_deg: yaw_deg(&(raw.inverse() * filtered)),
        });
        timestamp_ns = timestamp_ns.saturating_add(tick_ns);
    }

    let dt = tick.as_secs_f64();
    let step_delta_deg = args.degrees_per_second * dt;
    let expected_lead_deg = match config.mode() {
        FilterMode::None => 0.0,
        FilterMode::Prediction => f64::from(config.prediction_factor()) * step_delta_deg,
        FilterMode::Smoothing => {
            let decay = f64::from(config.smoothing_factor()) * dt;
            -step_delta_deg / decay.exp_m1()
        }
    };
    let final_lead_deg = rows.last().map_or(0.0, |row| row.lead_deg);

    Ok(SimulationReport {
        mode: config.mode(),
        rate_hz: args.rate_hz,
        degrees_per_second: args.degrees_per_second,
        step_delta_deg,
        expected_lead_deg,
        final_lead_deg,
        rows,
    })
}

fn yaw_deg(rotation: &Rotation) -> f64 {
    f64::from(rotation.euler_angles().2).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmotion_filters::FilterConfig;

    fn args(steps: u32) -> SimulateArgs {
        SimulateArgs {
            rate_hz: 100.0,
            degrees_per_second: 50.0,
            steps,
            config: None,
        }
    }

    #[test]
    fn test_prediction_settles_at_expected_lead() -> Result<(), Box<dyn std::error::Error>> {
        let report = simulate(&args(30), FilterConfig::default())?;
        assert_eq!(report.rows.len(), 30);
        assert!((report.expected_lead_deg - 5.0).abs() < 1e-9);
        assert!((report.final_lead_deg - report.expected_lead_deg).abs() < 0.05);
        Ok(())
    }

    #[test]
    fn test_smoothing_lags() -> Result<(), Box<dyn std::error::Error>> {
        let config = FilterConfig::default().with_mode(FilterMode::Smoothing);
        let report = simulate(&args(200), config)?;
        assert!(report.final_lead_deg < 0.0);
        assert!((report.final_lead_deg - report.expected_lead_deg).abs() < 0.05);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_rate() {
        let mut bad = args(10);
        bad.rate_hz = 0.0;
        assert!(matches!(
            simulate(&bad, FilterConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }
}

//! Replay recorded sample streams through the filters

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::Result;
use openmotion_filters::Rotation;
use openmotion_trackers::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::ReplayArgs;
use crate::config_file;
use crate::error::CliError;
use crate::output;

/// One line of a recorded stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRecord {
    pub tracker: u32,
    pub timestamp_ns: u64,
    pub rotation: [f32; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-tracker outcome of a replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSummary {
    pub tracker: u32,
    pub filtered: u64,
    pub passthrough: u64,
    pub rejected: u64,
    pub out_of_order: u64,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub records: u64,
    pub mode: String,
    pub trackers: Vec<TrackerSummary>,
}

/// Execute the replay command
pub fn execute(args: &ReplayArgs, json: bool) -> Result<()> {
    let config = config_file::load_or_default(args.config.as_deref())?;
    if !args.input.exists() {
        return Err(CliError::FileNotFound(args.input.display().to_string()).into());
    }
    info!(input = ?args.input, mode = %config.mode(), "Replaying sample stream");

    let reader = BufReader::new(File::open(&args.input)?);
    let (mut writer, records_on_stdout): (Box<dyn Write>, bool) = match &args.output {
        Some(path) => (Box::new(BufWriter::new(File::create(path)?)), false),
        None => (Box::new(io::stdout().lock()), true),
    };

    let summary = replay(reader, &mut writer, config)?;
    writer.flush()?;
    drop(writer);

    output::print_replay_summary(&summary, json, records_on_stdout)?;
    Ok(())
}

/// Filter every record from `reader` and write it, with its filtered rotation,
/// to `writer`.
pub fn replay<R: BufRead, W: Write>(reader: R, writer: &mut W, config: FilterConfig) -> Result<ReplaySummary> {
    let mut bank = FilterBank::new();
    let registry = InMemoryTrackerRegistry::new();
    let mut records = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut record: ReplayRecord = serde_json::from_str(line)
            .map_err(|e| CliError::InvalidInput(format!("line {}: {e}", index + 1)))?;
        let id = TrackerId::new(record.tracker);
        if !bank.contains(id) {
            register_tracker(&mut bank, &registry, id, true, config)?;
        }

        match bank.update_raw(id, record.rotation, record.timestamp_ns) {
            Ok(rotation) => record.filtered = Some(wxyz(&rotation)),
            Err(error) => {
                debug!(line = index + 1, %error, "Sample not filtered");
                record.error = Some(error.to_string());
            }
        }

        serde_json::to_writer(&mut *writer, &record)?;
        writeln!(writer)?;
        records += 1;
    }

    let trackers = registry
        .filter_controls()
        .iter()
        .map(|control| {
            let counters = control.counters();
            TrackerSummary {
                tracker: control.id().get(),
                filtered: counters.samples_filtered,
                passthrough: counters.samples_passthrough,
                rejected: counters.samples_rejected,
                out_of_order: counters.samples_out_of_order,
            }
        })
        .collect();

    Ok(ReplaySummary {
        records,
        mode: config.mode().to_string(),
        trackers,
    })
}

fn wxyz(rotation: &Rotation) -> [f32; 4] {
    let q = rotation.quaternion();
    [q.w, q.i, q.j, q.k]
}

//! `timegrid` CLI — lay out calendar grids and replay drag gestures.
//!
//! ## Usage
//!
//! ```sh
//! # Lay out a week of events (stdin → stdout)
//! cat events.json | timegrid layout --start 2026-03-16 --days 7
//!
//! # Use a config file and override the stagger
//! timegrid layout -i events.json --config grid.json --overlap-offset 8
//!
//! # Replay a recorded drag gesture and print updates plus the commit
//! timegrid drag -i gesture.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use std::io::{self, Read};
use timegrid::translator::PointerSample;
use timegrid::{DayColumn, DragStateManager, EngineConfig, Event, LayoutMetrics};

#[derive(Parser)]
#[command(
    name = "timegrid",
    version,
    about = "Calendar grid layout and drag translation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration JSON file (defaults apply to missing fields)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-day cell geometry for a JSON array of events
    Layout {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// First visible day (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Number of visible days
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Horizontal stagger between concurrent events, in pixels
        #[arg(long)]
        overlap_offset: Option<f64>,
    },
    /// Replay a recorded drag gesture through the drag state machine
    Drag {
        /// Gesture file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// A recorded drag gesture.
#[derive(Deserialize)]
struct Gesture {
    events: Vec<Event>,
    /// Id of the event being dragged.
    event_id: String,
    metrics: LayoutMetrics,
    #[serde(default)]
    samples: Vec<PointerSample>,
    release: PointerSample,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            input,
            output,
            start,
            days,
            overlap_offset,
        } => {
            if let Some(offset) = overlap_offset {
                config.overlap_offset_px = offset;
                config.validate().context("Invalid --overlap-offset")?;
            }

            let json = read_input(input.as_deref())?;
            let events: Vec<Event> =
                serde_json::from_str(&json).context("Failed to parse events JSON")?;
            let days = timegrid::visible_days(start, days);

            let columns = timegrid::layout_events(&events, None, &days, &config)
                .context("Failed to lay out events")?;
            log::info!(
                "laid out {} event(s) over {} day(s)",
                events.len(),
                days.len()
            );

            let value: Vec<serde_json::Value> = columns.iter().map(column_json).collect();
            write_output(output.as_deref(), &serde_json::to_string_pretty(&value)?)?;
        }
        Commands::Drag { input, output } => {
            let json = read_input(input.as_deref())?;
            let gesture: Gesture =
                serde_json::from_str(&json).context("Failed to parse gesture JSON")?;
            let report = replay(&gesture, &config)?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

/// Feed every sample of `gesture` through a drag manager.
///
/// The report lists each emitted (non-suppressed) update with the index of
/// the sample that produced it, followed by the commit.
fn replay(gesture: &Gesture, config: &EngineConfig) -> Result<serde_json::Value> {
    let event = gesture
        .events
        .iter()
        .find(|e| e.id == gesture.event_id)
        .with_context(|| format!("No event with id '{}'", gesture.event_id))?;
    event.validate().context("Dragged event is malformed")?;

    let mut manager = DragStateManager::new(config.drag);
    manager.drag_start(event)?;

    let mut updates = Vec::new();
    for (index, sample) in gesture.samples.iter().enumerate() {
        if let Some(update) = manager.pointer_move(sample, &gesture.metrics)? {
            updates.push(json!({ "sample": index, "update": update }));
        }
    }
    let commit = manager.release(&gesture.release, &gesture.metrics)?;

    log::info!(
        "replayed {} sample(s), {} emitted",
        gesture.samples.len(),
        updates.len()
    );

    Ok(json!({ "updates": updates, "commit": commit }))
}

fn column_json(column: &DayColumn<'_>) -> serde_json::Value {
    let cells: Vec<serde_json::Value> = column
        .cells
        .iter()
        .map(|cell| {
            json!({
                "event_id": cell.segment.event.id,
                "title": cell.segment.event.title,
                "start": cell.segment.start,
                "end": cell.segment.end,
                "geometry": cell.geometry,
            })
        })
        .collect();

    json!({
        "date": column.date,
        "cells": cells,
        "groups": column.groups,
    })
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

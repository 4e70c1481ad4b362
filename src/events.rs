// src/events.rs

use crate::detection::BallColor;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Label attached to every detection.
///
/// Only `Entry` exists: no occupancy state is carried across frames, so a
/// detection inside a quadrant cannot be told apart from the ball having just
/// arrived there. Distinguishing real entries from exits would need a
/// (color, quadrant) -> currently-inside map updated every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Entry,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Entry => "Entry",
        }
    }
}

/// A single quadrant event, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Seconds from the start of the video.
    pub timestamp: f64,
    pub quadrant: u32,
    pub color: BallColor,
    pub kind: EventKind,
}

/// Append-only log of quadrant events for one run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn record(&mut self, timestamp: f64, quadrant: u32, color: BallColor) {
        self.events.push(Event {
            timestamp,
            quadrant,
            color,
            kind: EventKind::Entry,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Write one comma-separated line per event in insertion order. The file
    /// is created (and any previous report truncated) even when no events
    /// were collected.
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        for event in &self.events {
            writeln!(
                writer,
                "{}, {}, {}, {}",
                event.timestamp,
                event.quadrant,
                event.color.as_str(),
                event.kind.as_str()
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

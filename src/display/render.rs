//! Feed Sinks
//!
//! `EventSink` is the seam between the dispatcher and whatever consumes
//! the feed. The production sink colors each line by tone and prints it;
//! tests substitute a collecting sink.
//!
//! Author: AI-Generated
//! Created: 2026-02-07

use crate::display::format::{FeedLine, Tone};
use colored::Colorize;

pub trait EventSink {
    fn emit(&mut self, line: &FeedLine);
}

/// Prints each feed line to stdout, colored by tone.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, line: &FeedLine) {
        let text = match line.tone {
            Tone::Positive => line.text.green(),
            Tone::Negative => line.text.bright_red(),
            Tone::Info => line.text.cyan(),
            Tone::Warning => line.text.yellow(),
        };
        println!("{}", text);
    }
}

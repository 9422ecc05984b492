//! Live feed presentation
//!
//! Formatting of pair events into aligned, tone-tagged rows and the
//! sinks that render them.
//!
//! Author: AI-Generated
//! Created: 2026-02-07

pub mod format;
pub mod render;

pub use format::{feed_line, pair_row, FeedLine, Tone};
pub use render::{ConsoleSink, EventSink};

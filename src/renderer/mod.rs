//! Presentation sinks
//!
//! A sink receives an owned [`Snapshot`] after every tick and draws it. It
//! never sees the live entity store. Backend specifics (window, GPU) stay
//! outside the crate: [`QuadBatch`] produces the vertex data a backend would
//! upload, [`LogSink`] reports headless runs.

pub mod log_sink;
pub mod quad_batch;
pub mod shapes;
pub mod vertex;

pub use log_sink::LogSink;
pub use quad_batch::QuadBatch;
pub use vertex::{Vertex, colors};

use crate::error::PresentError;
use crate::sim::Snapshot;

/// Something that draws post-tick snapshots
pub trait PresentationSink {
    fn present(&mut self, frame: &Snapshot) -> Result<(), PresentError>;

    /// Release display resources once the loop has stopped
    fn shutdown(&mut self) {}
}

/// HUD text for a score
pub fn score_label(score: u64) -> String {
    format!("Score: {score}")
}

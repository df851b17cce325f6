//! Headless sink that reports through the log

use super::{PresentationSink, score_label};
use crate::error::PresentError;
use crate::sim::Snapshot;

#[derive(Debug, Clone)]
pub struct LogSink {
    /// Log every Nth frame at info level (0 = never)
    report_every: u64,
    frames: u64,
    last: Option<Snapshot>,
}

impl LogSink {
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every,
            frames: 0,
            last: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recent snapshot presented
    pub fn last(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }
}

impl PresentationSink for LogSink {
    fn present(&mut self, frame: &Snapshot) -> Result<(), PresentError> {
        self.frames += 1;
        if self.report_every > 0 && self.frames % self.report_every == 0 {
            log::info!(
                "tick {:>6} | {} | {} projectiles, {} targets | player x={}",
                frame.tick,
                score_label(frame.score),
                frame.projectiles.len(),
                frame.targets.len(),
                frame.player.left()
            );
        }
        self.last = Some(frame.clone());
        Ok(())
    }

    fn shutdown(&mut self) {
        match &self.last {
            Some(frame) => log::info!(
                "Final frame {}: {} after {} frames",
                frame.tick,
                score_label(frame.score),
                self.frames
            ),
            None => log::info!("Stopped before the first frame"),
        }
    }
}

//! CPU-side frame builder
//!
//! Turns a snapshot into one triangle list plus a score label, ready to be
//! copied into a vertex buffer by whatever backend draws the frame.

use glam::Vec2;

use super::shapes::{quad, quads};
use super::vertex::{Vertex, colors};
use super::{PresentationSink, score_label};
use crate::error::PresentError;
use crate::sim::{Aabb, Snapshot};

/// Where the score text goes
pub const SCORE_POSITION: Vec2 = Vec2::new(10.0, 10.0);

/// A line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    pub color: [f32; 4],
}

/// Most recent frame, as vertices
#[derive(Debug, Clone)]
pub struct QuadBatch {
    screen: Vec2,
    vertices: Vec<Vertex>,
    label: Option<TextLabel>,
    frames: u64,
    open: bool,
}

impl QuadBatch {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen: Vec2::new(screen_width, screen_height),
            vertices: Vec::new(),
            label: None,
            frames: 0,
            open: true,
        }
    }

    /// Background first, then player, projectiles, targets
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices.as_slice())
    }

    pub fn label(&self) -> Option<&TextLabel> {
        self.label.as_ref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl PresentationSink for QuadBatch {
    fn present(&mut self, frame: &Snapshot) -> Result<(), PresentError> {
        if !self.open {
            return Err(PresentError::DisplayLost);
        }

        self.vertices.clear();
        self.vertices.extend_from_slice(&quad(
            &Aabb::new(0.0, 0.0, self.screen.x, self.screen.y),
            colors::BACKGROUND,
        ));
        self.vertices
            .extend_from_slice(&quad(&frame.player, colors::PLAYER));
        self.vertices
            .extend(quads(&frame.projectiles, colors::PROJECTILE));
        self.vertices.extend(quads(&frame.targets, colors::TARGET));

        self.label = Some(TextLabel {
            text: score_label(frame.score),
            pos: SCORE_POSITION,
            color: colors::SCORE_TEXT,
        });
        self.frames += 1;
        Ok(())
    }

    fn shutdown(&mut self) {
        log::debug!("QuadBatch closed after {} frames", self.frames);
        self.vertices.clear();
        self.label = None;
        self.open = false;
    }
}

//! Saved editing scenes
//!
//! A scene is the editor state the headless exporter replays onto a photo:
//! where the photo was displayed, the signboard, and the committed strokes.
//! All values are in display space.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::state::Session;
use crate::domain::{ContentUpdate, DisplayRect, Overlay, Stroke};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Where the photo was drawn when the scene was edited
    pub viewport: DisplayRect,
    #[serde(default)]
    pub overlay: Overlay,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Capture the current state of a session
    pub fn capture(session: &Session) -> Self {
        Self {
            viewport: session.viewport().unwrap_or_default(),
            overlay: session.overlay().clone(),
            strokes: session.strokes().strokes().to_vec(),
        }
    }

    /// Replay the scene onto `session` through its normal setters
    ///
    /// Values out of range are clamped the same way live edits are, and
    /// strokes below the commit threshold are dropped. Returns the number of
    /// strokes accepted.
    pub fn apply(self, session: &mut Session) -> usize {
        session.set_viewport(self.viewport);

        let content = self.overlay.content().clone();
        let overlay = &mut session.overlay;
        overlay.set_content(ContentUpdate {
            title: Some(content.title),
            location_details: Some(content.location_details),
            body: Some(content.body),
            title_scale: Some(content.title_scale),
            details_scale: Some(content.details_scale),
            body_scale: Some(content.body_scale),
        });
        overlay.set_variant(self.overlay.variant());
        overlay.set_bounds(self.overlay.bounds());
        if self.overlay.is_visible() {
            overlay.show();
        } else {
            overlay.hide();
        }

        let total = self.strokes.len();
        let accepted = self
            .strokes
            .into_iter()
            .filter(|stroke| session.strokes.push_committed(stroke.clone()))
            .count();
        if accepted < total {
            log::warn!("Dropped {} stroke(s) with too few points", total - accepted);
        }
        accepted
    }
}

// Swipe recognition.
// Near-vertical drags are page scrolls and short drags are accidental touches;
// both must not move the slider.

use serde::{Deserialize, Serialize};

use crate::types::Command;

/// Screen coordinate of a touch, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        TouchPoint { x, y }
    }
}

/// Swipe thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeSettings {
    /// Minimum horizontal travel in pixels.
    #[serde(default = "default_min_distance")]
    pub min_distance_px: f32,
    /// Maximum deviation from the horizontal axis in degrees.
    #[serde(default = "default_max_angle")]
    pub max_angle_deg: f32,
}

fn default_min_distance() -> f32 {
    50.0
}

fn default_max_angle() -> f32 {
    30.0
}

impl Default for SwipeSettings {
    fn default() -> Self {
        SwipeSettings {
            min_distance_px: default_min_distance(),
            max_angle_deg: default_max_angle(),
        }
    }
}

/// Classify a start/end pair. `None` means ignore.
pub fn classify(start: TouchPoint, end: TouchPoint, settings: &SwipeSettings) -> Option<Command> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let angle = dy.atan2(dx).to_degrees().abs();
    let horizontal =
        angle <= settings.max_angle_deg || angle >= 180.0 - settings.max_angle_deg;

    if !horizontal || dx.abs() < settings.min_distance_px {
        return None;
    }

    // Finger moving right reveals the previous slide.
    if dx > 0.0 {
        Some(Command::Previous)
    } else {
        Some(Command::Next)
    }
}

/// Holds the touch-start sample of the gesture in progress.
#[derive(Debug, Clone, Default)]
pub struct SwipeRecognizer {
    settings: SwipeSettings,
    start: Option<TouchPoint>,
}

impl SwipeRecognizer {
    pub fn new(settings: SwipeSettings) -> Self {
        SwipeRecognizer {
            settings,
            start: None,
        }
    }

    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
    }

    /// Finish the gesture. The sample is discarded whatever the outcome;
    /// a touch-end without a start is ignored.
    pub fn end(&mut self, point: TouchPoint) -> Option<Command> {
        let start = self.start.take()?;
        classify(start, point, &self.settings)
    }
}

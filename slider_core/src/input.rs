// Raw page input -> engine actions. Click vs key vs swipe is decided here so
// the engine only ever sees Next / Previous / GoTo.

use serde::{Deserialize, Serialize};

use crate::dots::DotIndicators;
use crate::gesture::{SwipeRecognizer, TouchPoint};
use crate::types::{Command, Key};

/// Input event from the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Click on the previous control.
    PrevClick,
    /// Click on the next control.
    NextClick,
    DotClick { index: usize },
    DotKey { index: usize, key: Key },
    /// Page-level keydown.
    KeyDown { key: Key },
    TouchStart { x: f32, y: f32 },
    TouchEnd { x: f32, y: f32 },
    VisibilityChange { hidden: bool },
    /// Page is being torn down.
    Unload,
}

/// What the engine should do with an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// User-initiated navigation: apply, then reset autoplay.
    Navigate(Command),
    Visibility { visible: bool },
    Teardown,
    Ignore,
}

/// Classify one input. Touch samples are buffered in `swipe`.
pub fn classify(
    event: &InputEvent,
    swipe: &mut SwipeRecognizer,
    dots: &DotIndicators,
    keyboard_navigation: bool,
) -> Action {
    let command = match event {
        InputEvent::PrevClick => Some(Command::Previous),
        InputEvent::NextClick => Some(Command::Next),
        InputEvent::DotClick { index } => dots.click(*index),
        InputEvent::DotKey { index, key } => dots.key(*index, *key),
        InputEvent::KeyDown { key } if keyboard_navigation => match key {
            Key::ArrowLeft => Some(Command::Previous),
            Key::ArrowRight => Some(Command::Next),
            _ => None,
        },
        InputEvent::KeyDown { .. } => None,
        InputEvent::TouchStart { x, y } => {
            swipe.begin(TouchPoint::new(*x, *y));
            None
        }
        InputEvent::TouchEnd { x, y } => swipe.end(TouchPoint::new(*x, *y)),
        InputEvent::VisibilityChange { hidden } => {
            return Action::Visibility { visible: !hidden }
        }
        InputEvent::Unload => return Action::Teardown,
    };

    command.map_or(Action::Ignore, Action::Navigate)
}

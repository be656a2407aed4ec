// Strong typing over strings. Newtypes for timestamps and timer handles.
// Everything that crosses to JS derives Serialize/Deserialize.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds (same unit as `performance.now()`). Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Convert a JS high-resolution time. Negative and NaN inputs clamp to zero.
    pub fn from_js(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Timestamp(ms.floor() as u64)
        } else {
            Timestamp(0)
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn after(&self, delay_ms: u64) -> Self {
        Timestamp(self.0.saturating_add(delay_ms))
    }
}

/// Handle to a pending timer. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u32);

impl TimerId {
    pub fn new(id: u32) -> Self {
        TimerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Input-source-agnostic navigation command fed into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    Next,
    Previous,
    GoTo { index: usize },
}

/// Keyboard keys the sliders react to, named after `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    #[serde(rename = " ", alias = "Spacebar")]
    Space,
    #[serde(other)]
    Other,
}

impl Key {
    /// Keys that activate a focused button-like element.
    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Engine lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderPhase {
    /// Accepting navigation.
    Idle,
    /// A transition is in flight; navigation is rejected.
    Transitioning,
}

/// One dot indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot {
    pub index: usize,
    /// Accessible label, e.g. "Slide 3".
    pub label: String,
    pub active: bool,
}

/// How a non-visible embedded player is paused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum PauseAction {
    /// Post a player API message into the iframe.
    PostMessage { message: String },
    /// Blank the iframe `src` and restore it after a delay.
    ReloadSource { restore_after_ms: u64 },
}

/// Visual instruction produced by a render adapter. JS applies these verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderCommand {
    /// Set `style.transform` and `style.transition` on the slide track.
    TranslateTrack {
        offset_px: f32,
        transform: String,
        transition: String,
    },
    /// Toggle the `active` class and `aria-hidden` on one slide.
    SetSlideActive { index: usize, active: bool },
    /// Pause the embedded player inside one slide.
    PauseEmbed { index: usize, action: PauseAction },
}

/// Side effect emitted by the engine for the host page to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SliderEvent {
    /// Dot set initialised. `generated` tells the host to create the elements.
    DotsBuilt { dots: Vec<Dot>, generated: bool },
    /// Active dot moved (`active` class and `aria-current`).
    DotsChanged { active: usize },
    /// Previous/next controls enabled or disabled.
    ControlsEnabled { enabled: bool },
    /// Output of the render adapter.
    Render { commands: Vec<RenderCommand> },
    /// New text for the live region with the given id.
    Announce { region_id: String, message: String },
}

/// Read-only view of an engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderSnapshot {
    pub current_index: usize,
    pub slide_count: usize,
    pub phase: SliderPhase,
    pub autoplay_armed: bool,
    pub page_visible: bool,
    pub dots: Vec<Dot>,
    pub live_region_id: String,
    pub live_region_text: String,
    pub destroyed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversions() {
        let ts = Timestamp::from_millis(1_500);
        assert_eq!(ts.as_millis(), 1_500);
        assert_eq!(ts.after(500).as_millis(), 2_000);
    }

    #[test]
    fn js_time_clamps() {
        assert_eq!(Timestamp::from_js(-5.0).as_millis(), 0);
        assert_eq!(Timestamp::from_js(f64::NAN).as_millis(), 0);
        assert_eq!(Timestamp::from_js(1234.9).as_millis(), 1234);
    }

    #[test]
    fn keys_parse_from_dom_names() {
        let space: Key = serde_json::from_str(r#"" ""#).unwrap();
        assert_eq!(space, Key::Space);
        let tab: Key = serde_json::from_str(r#""Tab""#).unwrap();
        assert_eq!(tab, Key::Other);
        let legacy: Key = serde_json::from_str(r#""Spacebar""#).unwrap();
        assert_eq!(legacy, Key::Space);
        let left: Key = serde_json::from_str(r#""ArrowLeft""#).unwrap();
        assert_eq!(left, Key::ArrowLeft);
        assert!(Key::Enter.activates());
        assert!(!Key::ArrowRight.activates());
    }

    #[test]
    fn events_are_tagged() {
        let json = serde_json::to_string(&SliderEvent::DotsChanged { active: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"DotsChanged","active":2}"#);
    }
}

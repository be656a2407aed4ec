// slider_core: Rust/WASM interaction engine for the clinic site.
// All state machines live here; JS only queries the DOM and applies events.

mod adapters;
mod autoplay;
mod config;
mod dots;
mod error;
mod gesture;
mod input;
mod navigation;
mod reveal;
mod slider;
mod tabs;
mod timer;
mod types;

use wasm_bindgen::prelude::*;

pub use adapters::{
    EmbedProvider, FadeAdapter, RenderAdapter, RenderContext, TrackAdapter, VideoTrackAdapter,
};
pub use autoplay::Autoplay;
pub use config::{RenderStyle, SliderConfig, SliderPreset, SliderSetup};
pub use dots::{DotIndicators, IndicatorSource};
pub use error::SliderError;
pub use gesture::{classify as classify_swipe, SwipeRecognizer, SwipeSettings, TouchPoint};
pub use input::{Action, InputEvent};
pub use navigation::{
    active_section, Announcement, HeaderController, HeaderSettings, HeaderView, MenuChange,
    SectionBounds, WasmHeader,
};
pub use reveal::{ElementRect, RevealStep, RevealTarget, RevealTracker, WasmReveal};
pub use slider::Slider;
pub use tabs::{scroll_hints, ScrollHints, TabSet, TabState, WasmTabs};
pub use timer::{TimerKind, TimerQueue};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Slider instance exposed to JavaScript.
///
/// Every call that changes slider state takes the host's current
/// `performance.now()` so due timers fire before the call is handled.
/// `destroy` and the read-only accessors need no time. Side effects
/// accumulate until `drain_events`.
#[wasm_bindgen]
pub struct WasmSlider {
    inner: Slider<Box<dyn RenderAdapter>>,
}

#[wasm_bindgen]
impl WasmSlider {
    /// Create from a `SliderSetup` JSON (engine config plus `render` block).
    #[wasm_bindgen(constructor)]
    pub fn new(setup_json: &str, now_ms: f64) -> Result<WasmSlider, JsValue> {
        let setup: SliderSetup = serde_json::from_str(setup_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid slider config: {}", e)))?;
        Self::from_setup(setup, now_ms).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create one of the site presets: "gallery", "video_gallery", "testimonials", "hero".
    /// `embed_sources_json` is an array of iframe sources (video gallery only; "[]" otherwise).
    pub fn preset(
        name: &str,
        slide_count: usize,
        slide_width_px: f32,
        embed_sources_json: &str,
        now_ms: f64,
    ) -> Result<WasmSlider, JsValue> {
        let preset = SliderPreset::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown slider preset: {}", name)))?;
        let embeds: Vec<String> = serde_json::from_str(embed_sources_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid embed sources: {}", e)))?;
        Self::from_setup(preset.setup(slide_count, slide_width_px, embeds), now_ms)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns true if the navigation was accepted.
    pub fn next(&mut self, now_ms: f64) -> bool {
        self.tick(now_ms);
        self.inner.next()
    }

    pub fn previous(&mut self, now_ms: f64) -> bool {
        self.tick(now_ms);
        self.inner.previous()
    }

    pub fn go_to(&mut self, index: usize, now_ms: f64) -> bool {
        self.tick(now_ms);
        self.inner.go_to(index)
    }

    pub fn start_autoplay(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.inner.start_autoplay();
    }

    pub fn stop_autoplay(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.inner.stop_autoplay();
    }

    pub fn reset_autoplay(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.inner.reset_autoplay();
    }

    /// Feed one `InputEvent` JSON. Returns true if it caused a navigation.
    pub fn handle_input(&mut self, event_json: &str, now_ms: f64) -> Result<bool, JsValue> {
        let event: InputEvent = serde_json::from_str(event_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid input event: {}", e)))?;
        self.tick(now_ms);
        Ok(self.inner.handle_input(&event))
    }

    pub fn set_page_visible(&mut self, visible: bool, now_ms: f64) {
        self.tick(now_ms);
        self.inner.set_page_visible(visible);
    }

    /// Fire due timers.
    pub fn tick(&mut self, now_ms: f64) {
        self.inner.advance_to(Timestamp::from_js(now_ms));
    }

    /// Next timer deadline in ms, or `undefined` when nothing is pending.
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner.next_deadline().map(|t| t.as_millis() as f64)
    }

    pub fn relayout(&mut self, slide_width_px: f32, now_ms: f64) {
        self.tick(now_ms);
        self.inner.relayout(slide_width_px);
    }

    pub fn refresh(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.inner.refresh();
    }

    pub fn destroy(&mut self) {
        self.inner.destroy();
    }

    pub fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.is_transitioning()
    }

    /// Side effects since the last call, as a JSON array of `SliderEvent`.
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.drain_events())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// `SliderSnapshot` JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl WasmSlider {
    fn from_setup(setup: SliderSetup, now_ms: f64) -> Result<WasmSlider, SliderError> {
        let adapter = setup.render.build(setup.config.slide_count)?;
        let inner = Slider::new(setup.config, adapter, Timestamp::from_js(now_ms))?;
        Ok(WasmSlider { inner })
    }
}

// Tabbed panel: one active tab, plus overflow hints for the scrollable tab strip.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::error::SliderError;

/// Scroll distance before an overflow hint appears.
pub const SCROLL_HINT_MARGIN_PX: f32 = 20.0;

/// One tab button's state (`active` class, `aria-selected`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    /// Id of the panel this tab controls (`data-id`).
    pub panel_id: String,
    pub selected: bool,
}

/// Which overflow hints the tab strip shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrollHints {
    pub left: bool,
    pub right: bool,
}

/// Tab strip with exactly one selected tab.
#[derive(Debug, Clone)]
pub struct TabSet {
    panels: Vec<String>,
    selected: usize,
}

impl TabSet {
    /// First tab starts selected.
    pub fn new(panels: Vec<String>) -> Result<Self, SliderError> {
        if panels.is_empty() {
            return Err(SliderError::InvalidConfig("tab set needs at least one tab".to_string()));
        }
        Ok(TabSet {
            panels,
            selected: 0,
        })
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_panel(&self) -> &str {
        &self.panels[self.selected]
    }

    /// Select by position. Returns false for an unknown index.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.panels.len() {
            debug!(index, "tab index out of range");
            return false;
        }
        self.selected = index;
        true
    }

    /// Select by panel id. Returns false for an unknown id.
    pub fn select(&mut self, panel_id: &str) -> bool {
        match self.panels.iter().position(|p| p == panel_id) {
            Some(index) => self.select_index(index),
            None => {
                debug!(panel_id, "unknown tab");
                false
            }
        }
    }

    pub fn states(&self) -> Vec<TabState> {
        self.panels
            .iter()
            .enumerate()
            .map(|(i, panel_id)| TabState {
                panel_id: panel_id.clone(),
                selected: i == self.selected,
            })
            .collect()
    }
}

/// Overflow hints for a horizontally scrollable strip.
pub fn scroll_hints(scroll_left: f32, scroll_width: f32, client_width: f32) -> ScrollHints {
    let max_scroll = scroll_width - client_width;
    ScrollHints {
        left: scroll_left > SCROLL_HINT_MARGIN_PX,
        right: scroll_left < max_scroll - SCROLL_HINT_MARGIN_PX,
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// WASM-exposed tab set.
#[wasm_bindgen]
pub struct WasmTabs {
    inner: TabSet,
}

#[wasm_bindgen]
impl WasmTabs {
    /// `panels_json` is an array of panel ids in button order.
    #[wasm_bindgen(constructor)]
    pub fn new(panels_json: &str) -> Result<WasmTabs, JsValue> {
        let panels: Vec<String> = serde_json::from_str(panels_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid tab list: {}", e)))?;
        let inner = TabSet::new(panels).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmTabs { inner })
    }

    pub fn select(&mut self, panel_id: &str) -> bool {
        self.inner.select(panel_id)
    }

    pub fn selected_panel(&self) -> String {
        self.inner.selected_panel().to_string()
    }

    /// Returns an array of `TabState` JSON.
    pub fn states(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.states())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Returns `ScrollHints` JSON.
    pub fn scroll_hints(
        &self,
        scroll_left: f32,
        scroll_width: f32,
        client_width: f32,
    ) -> Result<String, JsValue> {
        serde_json::to_string(&scroll_hints(scroll_left, scroll_width, client_width))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

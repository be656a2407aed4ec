// Scroll-triggered reveal. Each element is revealed once; feature cards get a
// second, staggered step so a row of cards animates in sequence.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Intersection ratio at which an element counts as seen.
pub const REVEAL_THRESHOLD: f32 = 0.15;

/// Stagger between consecutive feature cards.
pub const CARD_STAGGER_MS: u64 = 150;

/// Viewport inset used by the scroll fallback.
pub const FALLBACK_OFFSET_PX: f32 = 150.0;

/// Observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RevealTarget {
    /// Gets the extra `card-animated` step.
    #[serde(default)]
    pub feature_card: bool,
}

/// Reveal instruction: add `is-visible` now, `card-animated` after the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStep {
    pub index: usize,
    pub card_delay_ms: Option<u64>,
}

/// Vertical extent of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub top: f32,
    pub bottom: f32,
}

/// Fallback visibility test when IntersectionObserver is unavailable.
pub fn in_viewport(rect: ElementRect, viewport_height: f32) -> bool {
    rect.top <= viewport_height - FALLBACK_OFFSET_PX && rect.bottom >= FALLBACK_OFFSET_PX
}

/// Tracks which elements have been revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    targets: Vec<RevealTarget>,
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(targets: Vec<RevealTarget>) -> Self {
        let revealed = vec![false; targets.len()];
        RevealTracker { targets, revealed }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Elements still being observed.
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    /// Observer callback. Returns a step the first time `index` crosses the threshold.
    pub fn on_intersection(&mut self, index: usize, ratio: f32) -> Option<RevealStep> {
        if ratio < REVEAL_THRESHOLD || self.is_revealed(index) || index >= self.targets.len() {
            return None;
        }
        self.revealed[index] = true;
        let card_delay_ms = self
            .card_position(index)
            .map(|pos| pos as u64 * CARD_STAGGER_MS);
        Some(RevealStep {
            index,
            card_delay_ms,
        })
    }

    /// Scroll fallback: reveal everything currently in view, cards without stagger.
    pub fn on_scroll(&mut self, rects: &[ElementRect], viewport_height: f32) -> Vec<RevealStep> {
        let mut steps = Vec::new();
        for (index, rect) in rects.iter().enumerate().take(self.targets.len()) {
            if self.revealed[index] || !in_viewport(*rect, viewport_height) {
                continue;
            }
            self.revealed[index] = true;
            steps.push(RevealStep {
                index,
                card_delay_ms: self.targets[index].feature_card.then_some(0),
            });
        }
        steps
    }

    /// Position of `index` among feature cards only.
    fn card_position(&self, index: usize) -> Option<usize> {
        if !self.targets[index].feature_card {
            return None;
        }
        Some(
            self.targets[..index]
                .iter()
                .filter(|t| t.feature_card)
                .count(),
        )
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// WASM-exposed reveal tracker.
#[wasm_bindgen]
pub struct WasmReveal {
    inner: RevealTracker,
}

#[wasm_bindgen]
impl WasmReveal {
    /// `targets_json` is an array of `RevealTarget` in document order.
    #[wasm_bindgen(constructor)]
    pub fn new(targets_json: &str) -> Result<WasmReveal, JsValue> {
        let targets: Vec<RevealTarget> = serde_json::from_str(targets_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid reveal targets: {}", e)))?;
        Ok(WasmReveal {
            inner: RevealTracker::new(targets),
        })
    }

    /// Returns `RevealStep` JSON or `null`.
    pub fn on_intersection(&mut self, index: usize, ratio: f32) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.on_intersection(index, ratio))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// `rects_json` is an array of `ElementRect`. Returns an array of `RevealStep`.
    pub fn on_scroll(&mut self, rects_json: &str, viewport_height: f32) -> Result<String, JsValue> {
        let rects: Vec<ElementRect> = serde_json::from_str(rects_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid rects: {}", e)))?;
        serde_json::to_string(&self.inner.on_scroll(&rects, viewport_height))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RevealTracker {
        RevealTracker::new(vec![
            RevealTarget { feature_card: false },
            RevealTarget { feature_card: true },
            RevealTarget { feature_card: false },
            RevealTarget { feature_card: true },
        ])
    }

    #[test]
    fn reveals_once_at_threshold() {
        let mut t = tracker();
        assert_eq!(t.on_intersection(0, 0.1), None);
        assert_eq!(
            t.on_intersection(0, 0.15),
            Some(RevealStep {
                index: 0,
                card_delay_ms: None
            })
        );
        assert_eq!(t.on_intersection(0, 1.0), None);
        assert_eq!(t.pending(), 3);
    }

    #[test]
    fn cards_stagger_by_card_order() {
        let mut t = tracker();
        assert_eq!(t.on_intersection(3, 0.5).unwrap().card_delay_ms, Some(150));
        assert_eq!(t.on_intersection(1, 0.5).unwrap().card_delay_ms, Some(0));
    }

    #[test]
    fn unknown_index_ignored() {
        let mut t = tracker();
        assert_eq!(t.on_intersection(10, 1.0), None);
    }

    #[test]
    fn scroll_fallback_uses_viewport_inset() {
        let mut t = tracker();
        let rects = [
            ElementRect { top: 100.0, bottom: 400.0 },
            ElementRect { top: 700.0, bottom: 900.0 },
            ElementRect { top: -500.0, bottom: 100.0 },
            ElementRect { top: 200.0, bottom: 300.0 },
        ];
        let steps = t.on_scroll(&rects, 800.0);
        assert_eq!(
            steps,
            vec![
                RevealStep { index: 0, card_delay_ms: None },
                RevealStep { index: 3, card_delay_ms: Some(0) },
            ]
        );
        assert!(t.on_scroll(&rects, 800.0).is_empty());
    }
}

// Header controller: hide-on-scroll, back-to-top, mobile menu, active section.
// All thresholds are CSS pixels; state is per instance, fed by host scroll events.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Live region used for menu announcements.
pub const MENU_LIVE_REGION_ID: &str = "menu-live-region";

/// Header thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderSettings {
    /// Above this offset the header gets the `scrolled` style.
    #[serde(default = "default_scrolled_after")]
    pub scrolled_after_px: f32,
    /// The header may only hide below this offset.
    #[serde(default = "default_hide_after")]
    pub hide_after_px: f32,
    /// Downward travel between samples needed to hide.
    #[serde(default = "default_hide_delta")]
    pub hide_delta_px: f32,
    /// Upward travel between samples needed to show again.
    #[serde(default = "default_show_delta")]
    pub show_delta_px: f32,
    #[serde(default = "default_back_to_top_after")]
    pub back_to_top_after_px: f32,
    /// Viewports at or below this width use the hamburger menu.
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: f32,
}

fn default_scrolled_after() -> f32 {
    100.0
}

fn default_hide_after() -> f32 {
    300.0
}

fn default_hide_delta() -> f32 {
    50.0
}

fn default_show_delta() -> f32 {
    10.0
}

fn default_back_to_top_after() -> f32 {
    600.0
}

fn default_mobile_breakpoint() -> f32 {
    768.0
}

impl Default for HeaderSettings {
    fn default() -> Self {
        HeaderSettings {
            scrolled_after_px: default_scrolled_after(),
            hide_after_px: default_hide_after(),
            hide_delta_px: default_hide_delta(),
            show_delta_px: default_show_delta(),
            back_to_top_after_px: default_back_to_top_after(),
            mobile_breakpoint_px: default_mobile_breakpoint(),
        }
    }
}

/// Classes and visibility the host applies after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderView {
    pub scrolled: bool,
    pub hidden: bool,
    pub back_to_top: bool,
    pub menu_open: bool,
    pub hamburger_visible: bool,
}

/// Result of opening or closing the mobile menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuChange {
    pub open: bool,
    /// Lock body scroll at this offset (menu opened).
    pub lock_scroll_at: Option<f32>,
    /// Restore body scroll to this offset (menu closed).
    pub restore_scroll_to: Option<f32>,
    pub announcement: Option<Announcement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub region_id: String,
    pub message: String,
}

/// A page section the nav links point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

/// Header state for one page.
#[derive(Debug, Clone, Default)]
pub struct HeaderController {
    settings: HeaderSettings,
    last_scroll_y: f32,
    scrolled: bool,
    hidden: bool,
    back_to_top: bool,
    menu_open: bool,
    scroll_before_menu: f32,
    hamburger_visible: bool,
}

impl HeaderController {
    pub fn new(settings: HeaderSettings, scroll_y: f32, viewport_width: f32) -> Self {
        let mut header = HeaderController {
            settings,
            ..Default::default()
        };
        header.scrolled = scroll_y > settings.scrolled_after_px;
        header.back_to_top = scroll_y > settings.back_to_top_after_px;
        header.hamburger_visible = viewport_width <= settings.mobile_breakpoint_px;
        header.last_scroll_y = scroll_y;
        header
    }

    pub fn view(&self) -> HeaderView {
        HeaderView {
            scrolled: self.scrolled,
            hidden: self.hidden,
            back_to_top: self.back_to_top,
            menu_open: self.menu_open,
            hamburger_visible: self.hamburger_visible,
        }
    }

    /// Feed a (throttled) scroll sample.
    pub fn on_scroll(&mut self, scroll_y: f32) -> HeaderView {
        let s = self.settings;
        if scroll_y > s.scrolled_after_px {
            if scroll_y > self.last_scroll_y + s.hide_delta_px
                && !self.hidden
                && scroll_y > s.hide_after_px
            {
                self.hidden = true;
            } else if scroll_y < self.last_scroll_y - s.show_delta_px && self.hidden {
                self.hidden = false;
            }
            self.scrolled = true;
        } else {
            self.scrolled = false;
            self.hidden = false;
        }

        self.back_to_top = scroll_y > s.back_to_top_after_px;
        self.last_scroll_y = scroll_y;
        self.view()
    }

    /// Close the menu when the viewport grows past the breakpoint.
    pub fn on_resize(&mut self, viewport_width: f32) -> Option<MenuChange> {
        self.hamburger_visible = viewport_width <= self.settings.mobile_breakpoint_px;
        if !self.hamburger_visible && self.menu_open {
            Some(self.close_menu())
        } else {
            None
        }
    }

    pub fn toggle_menu(&mut self, scroll_y: f32) -> MenuChange {
        if self.menu_open {
            let mut change = self.close_menu();
            change.announcement = Some(Announcement {
                region_id: MENU_LIVE_REGION_ID.to_string(),
                message: "Navigation menu closed".to_string(),
            });
            change
        } else {
            self.menu_open = true;
            self.scroll_before_menu = scroll_y;
            MenuChange {
                open: true,
                lock_scroll_at: Some(scroll_y),
                restore_scroll_to: None,
                announcement: Some(Announcement {
                    region_id: MENU_LIVE_REGION_ID.to_string(),
                    message: "Navigation menu opened".to_string(),
                }),
            }
        }
    }

    /// Close without announcing (outside click, nav link, resize).
    pub fn close_menu(&mut self) -> MenuChange {
        let was_open = self.menu_open;
        self.menu_open = false;
        MenuChange {
            open: false,
            lock_scroll_at: None,
            restore_scroll_to: was_open.then_some(self.scroll_before_menu),
            announcement: None,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }
}

/// Section under the header at `scroll_y`. Later sections win on overlap.
pub fn active_section<'a>(
    sections: &'a [SectionBounds],
    scroll_y: f32,
    header_height: f32,
) -> Option<&'a str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.top - header_height - 20.0;
            scroll_y >= top && scroll_y < top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// WASM-exposed header controller.
#[wasm_bindgen]
pub struct WasmHeader {
    inner: HeaderController,
}

#[wasm_bindgen]
impl WasmHeader {
    /// Create from JSON `HeaderSettings` (empty object for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings_json: &str,
        scroll_y: f32,
        viewport_width: f32,
    ) -> Result<WasmHeader, JsValue> {
        let settings: HeaderSettings = serde_json::from_str(settings_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid header settings: {}", e)))?;
        Ok(WasmHeader {
            inner: HeaderController::new(settings, scroll_y, viewport_width),
        })
    }

    /// Current `HeaderView` JSON, for the first paint.
    pub fn view(&self) -> Result<String, JsValue> {
        to_json(&self.inner.view())
    }

    /// Returns `HeaderView` JSON.
    pub fn on_scroll(&mut self, scroll_y: f32) -> Result<String, JsValue> {
        to_json(&self.inner.on_scroll(scroll_y))
    }

    /// Returns `MenuChange` JSON, or `null` when nothing changed.
    pub fn on_resize(&mut self, viewport_width: f32) -> Result<String, JsValue> {
        to_json(&self.inner.on_resize(viewport_width))
    }

    pub fn toggle_menu(&mut self, scroll_y: f32) -> Result<String, JsValue> {
        to_json(&self.inner.toggle_menu(scroll_y))
    }

    pub fn close_menu(&mut self) -> Result<String, JsValue> {
        to_json(&self.inner.close_menu())
    }

    /// `sections_json` is an array of `SectionBounds`. Returns the id or `undefined`.
    pub fn active_section(
        &self,
        sections_json: &str,
        scroll_y: f32,
        header_height: f32,
    ) -> Result<Option<String>, JsValue> {
        let sections: Vec<SectionBounds> = serde_json::from_str(sections_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid sections: {}", e)))?;
        Ok(active_section(&sections, scroll_y, header_height).map(str::to_string))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> HeaderController {
        HeaderController::new(HeaderSettings::default(), 0.0, 1200.0)
    }

    #[test]
    fn top_of_page_is_plain() {
        let mut h = header();
        let view = h.on_scroll(50.0);
        assert!(!view.scrolled && !view.hidden && !view.back_to_top);
    }

    #[test]
    fn hides_on_fast_scroll_down_past_threshold() {
        let mut h = header();
        // Scrolled but too shallow to hide.
        let view = h.on_scroll(250.0);
        assert!(view.scrolled && !view.hidden);

        let view = h.on_scroll(400.0);
        assert!(view.hidden);
    }

    #[test]
    fn small_moves_keep_state() {
        let mut h = header();
        h.on_scroll(250.0);
        h.on_scroll(400.0);
        // Down 30: below hide delta, still hidden. Up 5: below show delta.
        assert!(h.on_scroll(430.0).hidden);
        assert!(h.on_scroll(425.0).hidden);
        // Up 20: shows.
        assert!(!h.on_scroll(405.0).hidden);
    }

    #[test]
    fn returning_to_top_resets() {
        let mut h = header();
        h.on_scroll(250.0);
        h.on_scroll(800.0);
        let view = h.on_scroll(80.0);
        assert!(!view.scrolled && !view.hidden && !view.back_to_top);
    }

    #[test]
    fn back_to_top_after_600() {
        let mut h = header();
        assert!(!h.on_scroll(600.0).back_to_top);
        assert!(h.on_scroll(601.0).back_to_top);
    }

    #[test]
    fn initial_state_from_scroll_position() {
        let h = HeaderController::new(HeaderSettings::default(), 700.0, 500.0);
        let view = h.view();
        assert!(view.scrolled && view.back_to_top && view.hamburger_visible);
        assert!(!view.hidden);
    }

    #[test]
    fn menu_toggle_announces_and_restores_scroll() {
        let mut h = HeaderController::new(HeaderSettings::default(), 0.0, 400.0);
        let open = h.toggle_menu(320.0);
        assert!(open.open);
        assert_eq!(open.lock_scroll_at, Some(320.0));
        assert_eq!(
            open.announcement.as_ref().map(|a| a.message.as_str()),
            Some("Navigation menu opened")
        );

        let closed = h.toggle_menu(0.0);
        assert!(!closed.open);
        assert_eq!(closed.restore_scroll_to, Some(320.0));
        assert_eq!(
            closed.announcement.map(|a| a.message),
            Some("Navigation menu closed".to_string())
        );
    }

    #[test]
    fn closing_a_closed_menu_restores_nothing() {
        let mut h = header();
        assert_eq!(h.close_menu().restore_scroll_to, None);
    }

    #[test]
    fn resize_to_desktop_closes_menu() {
        let mut h = HeaderController::new(HeaderSettings::default(), 0.0, 400.0);
        h.toggle_menu(100.0);
        assert!(h.on_resize(700.0).is_none());
        let change = h.on_resize(1024.0).expect("menu closes");
        assert!(!change.open);
        assert!(!h.menu_open());
        assert!(!h.view().hamburger_visible);
    }

    #[test]
    fn active_section_accounts_for_header() {
        let sections = vec![
            SectionBounds {
                id: "home".into(),
                top: 0.0,
                height: 600.0,
            },
            SectionBounds {
                id: "about".into(),
                top: 600.0,
                height: 800.0,
            },
        ];
        assert_eq!(active_section(&sections, 100.0, 80.0), Some("home"));
        // 600 - 80 - 20 = 500 is where "about" starts.
        assert_eq!(active_section(&sections, 500.0, 80.0), Some("about"));
        assert_eq!(active_section(&sections, 5000.0, 80.0), None);
    }

    #[test]
    fn wasm_header_scroll_json() {
        let mut header = WasmHeader::new("{}", 0.0, 1200.0).expect("defaults parse");
        let json = header.on_scroll(700.0).expect("serialize");
        let view: HeaderView = serde_json::from_str(&json).unwrap();
        assert!(view.scrolled && view.back_to_top);
        assert_eq!(header.on_resize(1300.0).unwrap(), "null");
    }
}

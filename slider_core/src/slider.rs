// The slider engine: index state, transition lock, autoplay, dots, live region.
// Rule: at most one transition in flight. Requests during a transition are
// dropped, never queued.

use tracing::{debug, info};

use crate::adapters::{RenderAdapter, RenderContext};
use crate::autoplay::Autoplay;
use crate::config::SliderConfig;
use crate::dots::DotIndicators;
use crate::error::SliderError;
use crate::gesture::SwipeRecognizer;
use crate::input::{self, Action, InputEvent};
use crate::timer::{TimerKind, TimerQueue};
use crate::types::*;

/// Accessibility text region owned by one slider.
#[derive(Debug, Clone)]
struct LiveRegion {
    id: String,
    text: String,
}

/// One carousel instance, generic over its render adapter.
pub struct Slider<A: RenderAdapter> {
    config: SliderConfig,
    adapter: A,
    current_index: usize,
    /// Pending unlock timer; `Some` iff transitioning.
    unlock: Option<TimerId>,
    timers: TimerQueue,
    autoplay: Autoplay,
    dots: DotIndicators,
    swipe: SwipeRecognizer,
    live_region: LiveRegion,
    events: Vec<SliderEvent>,
    now: Timestamp,
    destroyed: bool,
}

impl<A: RenderAdapter> Slider<A> {
    /// Create the instance, draw slide 0 and arm autoplay if enabled.
    /// A slider with no slides is valid and inert.
    pub fn new(config: SliderConfig, adapter: A, now: Timestamp) -> Result<Self, SliderError> {
        config.validate()?;

        let dots = DotIndicators::build(config.indicators, config.slide_count, &config.dot_label);
        let mut slider = Slider {
            autoplay: Autoplay::new(config.autoplay_enabled, config.autoplay_delay_ms),
            swipe: SwipeRecognizer::new(config.swipe),
            live_region: LiveRegion {
                id: config.live_region_id.clone(),
                text: String::new(),
            },
            config,
            adapter,
            current_index: 0,
            unlock: None,
            timers: TimerQueue::new(),
            dots,
            events: Vec::new(),
            now,
            destroyed: false,
        };

        if slider.config.slide_count == 0 {
            debug!(region = %slider.live_region.id, "slider has no slides, staying inert");
            return Ok(slider);
        }

        if !slider.dots.is_empty() {
            slider.events.push(SliderEvent::DotsBuilt {
                dots: slider.dots.dots().to_vec(),
                generated: slider.dots.is_generated(),
            });
        }
        slider.render();
        slider.autoplay.start(&mut slider.timers, now);

        info!(
            slides = slider.config.slide_count,
            autoplay = slider.autoplay.is_armed(),
            unit = slider.adapter.unit(),
            "slider initialised"
        );
        Ok(slider)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigation is timed from the clock of the last `advance_to`. Call it
    /// first with the current time, or the unlock is scheduled too early.
    pub fn next(&mut self) -> bool {
        match self.step(1) {
            Some(target) => self.navigate(target),
            None => false,
        }
    }

    /// See `next` for timing.
    pub fn previous(&mut self) -> bool {
        match self.step(-1) {
            Some(target) => self.navigate(target),
            None => false,
        }
    }

    /// Jump to `index`. Out-of-range or current indices are ignored.
    /// Like `next`, this uses the clock of the last `advance_to`.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.config.slide_count {
            debug!(index, slides = self.config.slide_count, "go_to out of range");
            return false;
        }
        self.navigate(index)
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::GoTo { index } => self.go_to(index),
        }
    }

    fn step(&self, delta: isize) -> Option<usize> {
        let count = self.config.slide_count;
        if count == 0 {
            return None;
        }
        let current = self.current_index as isize;
        let target = current + delta;
        if self.config.wrap_around {
            Some(target.rem_euclid(count as isize) as usize)
        } else if (0..count as isize).contains(&target) {
            Some(target as usize)
        } else {
            None
        }
    }

    fn navigate(&mut self, target: usize) -> bool {
        if self.destroyed || self.config.slide_count == 0 {
            return false;
        }
        if self.unlock.is_some() {
            debug!(target, current = self.current_index, "navigation rejected: transition in flight");
            return false;
        }
        if target == self.current_index {
            return false;
        }

        self.unlock = Some(self.timers.schedule_once(
            TimerKind::Unlock,
            self.now,
            self.config.transition_duration_ms,
        ));
        self.events.push(SliderEvent::ControlsEnabled { enabled: false });

        self.current_index = target;

        if !self.dots.is_empty() {
            self.dots.set_active(target);
            self.events.push(SliderEvent::DotsChanged { active: target });
        }
        self.render();
        self.announce();

        debug!(index = target, "navigation accepted");
        true
    }

    fn render(&mut self) {
        let ctx = RenderContext {
            index: self.current_index,
            slide_count: self.config.slide_count,
            transition_ms: self.config.transition_duration_ms,
        };
        let commands = self.adapter.render(&ctx);
        self.events.push(SliderEvent::Render { commands });
    }

    fn announce(&mut self) {
        let message = format!(
            "Showing {} {} of {}",
            self.adapter.unit(),
            self.current_index + 1,
            self.config.slide_count
        );
        self.live_region.text = message.clone();
        self.events.push(SliderEvent::Announce {
            region_id: self.live_region.id.clone(),
            message,
        });
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route one page input. User navigation always pushes autoplay back a full
    /// delay, whether or not the navigation itself was accepted.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.destroyed {
            return false;
        }
        let action = input::classify(
            event,
            &mut self.swipe,
            &self.dots,
            self.config.keyboard_navigation,
        );
        match action {
            Action::Navigate(command) => {
                let accepted = self.apply(command);
                self.reset_autoplay();
                accepted
            }
            Action::Visibility { visible } => {
                self.set_page_visible(visible);
                false
            }
            Action::Teardown => {
                self.destroy();
                false
            }
            Action::Ignore => false,
        }
    }

    // -------------------------------------------------------------------------
    // Autoplay
    // -------------------------------------------------------------------------

    pub fn start_autoplay(&mut self) {
        if self.destroyed || self.config.slide_count == 0 {
            return;
        }
        self.autoplay.start(&mut self.timers, self.now);
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop(&mut self.timers);
    }

    pub fn reset_autoplay(&mut self) {
        if self.destroyed || self.config.slide_count == 0 {
            return;
        }
        self.autoplay.reset(&mut self.timers, self.now);
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        if self.destroyed || self.config.slide_count == 0 {
            return;
        }
        self.autoplay
            .set_page_visible(visible, &mut self.timers, self.now);
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Move the engine clock to `now`, firing due timers in deadline order.
    /// Earlier times are ignored.
    ///
    /// An autoplay tick that fires late still starts its transition at `now`,
    /// since that is when the host applies the render. The unlock therefore
    /// lands a full duration after `now`, never at the stale deadline.
    pub fn advance_to(&mut self, now: Timestamp) {
        if now < self.now {
            return;
        }
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.kind {
                TimerKind::Unlock => {
                    self.now = self.now.max(fired.at);
                    if self.unlock == Some(fired.id) {
                        self.unlock = None;
                        self.events.push(SliderEvent::ControlsEnabled { enabled: true });
                    }
                }
                TimerKind::Autoplay => {
                    self.now = now;
                    if self.autoplay.owns(fired.id) {
                        self.next();
                    }
                }
            }
        }
        self.now = now;
    }

    /// When the host should next call `advance_to`.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    // -------------------------------------------------------------------------
    // Layout & lifecycle
    // -------------------------------------------------------------------------

    /// Redraw the current slide without navigating (after resize or page load).
    pub fn refresh(&mut self) {
        if self.destroyed || self.config.slide_count == 0 {
            return;
        }
        self.render();
    }

    pub fn relayout(&mut self, slide_width_px: f32) {
        self.adapter.relayout(slide_width_px);
        self.refresh();
    }

    /// Cancel every timer. The instance ignores all later calls.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.autoplay.stop(&mut self.timers);
        self.timers.clear();
        self.unlock = None;
        self.destroyed = true;
        info!(region = %self.live_region.id, "slider destroyed");
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Take the side effects produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.config.slide_count
    }

    pub fn phase(&self) -> SliderPhase {
        if self.unlock.is_some() {
            SliderPhase::Transitioning
        } else {
            SliderPhase::Idle
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.unlock.is_some()
    }

    pub fn autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn pending_timers(&self, kind: TimerKind) -> usize {
        self.timers.pending(kind)
    }

    pub fn dots(&self) -> &[Dot] {
        self.dots.dots()
    }

    pub fn announcement(&self) -> &str {
        &self.live_region.text
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn snapshot(&self) -> SliderSnapshot {
        SliderSnapshot {
            current_index: self.current_index,
            slide_count: self.config.slide_count,
            phase: self.phase(),
            autoplay_armed: self.autoplay.is_armed(),
            page_visible: self.autoplay.page_visible(),
            dots: self.dots.dots().to_vec(),
            live_region_id: self.live_region.id.clone(),
            live_region_text: self.live_region.text.clone(),
            destroyed: self.destroyed,
        }
    }
}

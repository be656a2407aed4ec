// Dot indicators. The engine keeps the active marker in sync; a dot only
// turns its activation into a GoTo command.

use serde::{Deserialize, Serialize};

use crate::types::{Command, Dot, Key};

/// Where the indicator elements come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSource {
    /// The engine builds one dot per slide; the host creates the elements.
    Generated,
    /// The page markup already contains the dots; the engine only tracks them.
    External,
    /// No dot container on the page.
    None,
}

/// Ordered dot set, one per slide.
#[derive(Debug, Clone)]
pub struct DotIndicators {
    source: IndicatorSource,
    dots: Vec<Dot>,
}

impl DotIndicators {
    /// Build the set with the first dot active. Labels read "{prefix} {n}".
    pub fn build(source: IndicatorSource, slide_count: usize, label_prefix: &str) -> Self {
        let dots = match source {
            IndicatorSource::None => Vec::new(),
            IndicatorSource::Generated | IndicatorSource::External => (0..slide_count)
                .map(|index| Dot {
                    index,
                    label: format!("{} {}", label_prefix, index + 1),
                    active: index == 0,
                })
                .collect(),
        };
        DotIndicators { source, dots }
    }

    pub fn is_generated(&self) -> bool {
        self.source == IndicatorSource::Generated
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.dots.iter().position(|d| d.active)
    }

    /// Mark exactly `index` active. Out-of-range indices leave the set unchanged.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.dots.len() {
            return;
        }
        for dot in &mut self.dots {
            dot.active = dot.index == index;
        }
    }

    /// Click on a dot.
    pub fn click(&self, index: usize) -> Option<Command> {
        self.dots.get(index).map(|d| Command::GoTo { index: d.index })
    }

    /// Key press on a focused dot; only Enter and Space activate.
    pub fn key(&self, index: usize, key: Key) -> Option<Command> {
        if key.activates() {
            self.click(index)
        } else {
            None
        }
    }
}

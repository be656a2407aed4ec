// Slider configuration passed from JS, plus the site's four presets.
// The transition duration lives only here and reaches adapters via RenderContext.

use serde::{Deserialize, Serialize};

use crate::adapters::{FadeAdapter, RenderAdapter, TrackAdapter, VideoTrackAdapter};
use crate::dots::IndicatorSource;
use crate::error::SliderError;
use crate::gesture::SwipeSettings;

/// Immutable per-instance engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Number of slides; fixed for the instance's lifetime.
    pub slide_count: usize,
    #[serde(default = "default_true")]
    pub autoplay_enabled: bool,
    #[serde(default = "default_autoplay_delay")]
    pub autoplay_delay_ms: u64,
    /// Must equal the visual transition length.
    #[serde(default = "default_transition_duration")]
    pub transition_duration_ms: u64,
    #[serde(default = "default_true")]
    pub wrap_around: bool,
    #[serde(default = "default_indicators")]
    pub indicators: IndicatorSource,
    /// Dot labels read "{dot_label} {n}".
    #[serde(default = "default_dot_label")]
    pub dot_label: String,
    /// Id of the live region that receives announcements.
    #[serde(default = "default_live_region_id")]
    pub live_region_id: String,
    /// React to page-level ArrowLeft/ArrowRight.
    #[serde(default)]
    pub keyboard_navigation: bool,
    #[serde(default)]
    pub swipe: SwipeSettings,
}

fn default_true() -> bool {
    true
}

fn default_autoplay_delay() -> u64 {
    5000
}

fn default_transition_duration() -> u64 {
    500
}

fn default_indicators() -> IndicatorSource {
    IndicatorSource::Generated
}

fn default_dot_label() -> String {
    "Slide".to_string()
}

fn default_live_region_id() -> String {
    "slider-live-region".to_string()
}

impl SliderConfig {
    /// Defaults for everything but the slide count.
    pub fn new(slide_count: usize) -> Self {
        SliderConfig {
            slide_count,
            autoplay_enabled: default_true(),
            autoplay_delay_ms: default_autoplay_delay(),
            transition_duration_ms: default_transition_duration(),
            wrap_around: default_true(),
            indicators: default_indicators(),
            dot_label: default_dot_label(),
            live_region_id: default_live_region_id(),
            keyboard_navigation: false,
            swipe: SwipeSettings::default(),
        }
    }

    pub fn validate(&self) -> Result<(), SliderError> {
        if self.autoplay_enabled && self.autoplay_delay_ms == 0 {
            return Err(SliderError::InvalidConfig(
                "autoplay_delay_ms must be positive when autoplay is enabled".to_string(),
            ));
        }
        if !self.swipe.min_distance_px.is_finite() || self.swipe.min_distance_px < 0.0 {
            return Err(SliderError::InvalidConfig(format!(
                "swipe.min_distance_px must be a non-negative number, got {}",
                self.swipe.min_distance_px
            )));
        }
        if !(0.0..=90.0).contains(&self.swipe.max_angle_deg) {
            return Err(SliderError::InvalidConfig(format!(
                "swipe.max_angle_deg must be within 0..=90, got {}",
                self.swipe.max_angle_deg
            )));
        }
        if self.live_region_id.trim().is_empty() {
            return Err(SliderError::InvalidConfig(
                "live_region_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which render adapter an instance uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderStyle {
    Track {
        #[serde(default = "default_track_unit")]
        unit: String,
        #[serde(default)]
        slide_width_px: f32,
    },
    VideoTrack {
        #[serde(default = "default_video_unit")]
        unit: String,
        #[serde(default)]
        slide_width_px: f32,
        /// iframe `src` per slide, in order. Empty disables pausing.
        #[serde(default)]
        embed_sources: Vec<String>,
    },
    Fade {
        #[serde(default = "default_fade_unit")]
        unit: String,
    },
}

fn default_track_unit() -> String {
    "image slide".to_string()
}

fn default_video_unit() -> String {
    "video".to_string()
}

fn default_fade_unit() -> String {
    "testimonial".to_string()
}

impl RenderStyle {
    /// Build the adapter for an instance with `slide_count` slides.
    pub fn build(&self, slide_count: usize) -> Result<Box<dyn RenderAdapter>, SliderError> {
        let adapter: Box<dyn RenderAdapter> = match self {
            RenderStyle::Track {
                unit,
                slide_width_px,
            } => Box::new(TrackAdapter::new(unit.clone(), *slide_width_px)),
            RenderStyle::VideoTrack {
                unit,
                slide_width_px,
                embed_sources,
            } => {
                if !embed_sources.is_empty() && embed_sources.len() != slide_count {
                    return Err(SliderError::EmbedMismatch {
                        expected: slide_count,
                        found: embed_sources.len(),
                    });
                }
                Box::new(VideoTrackAdapter::from_sources(
                    unit.clone(),
                    *slide_width_px,
                    embed_sources.as_slice(),
                ))
            }
            RenderStyle::Fade { unit } => Box::new(FadeAdapter::new(unit.clone())),
        };
        Ok(adapter)
    }
}

/// Engine config plus render style; the JSON shape `WasmSlider` accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSetup {
    #[serde(flatten)]
    pub config: SliderConfig,
    pub render: RenderStyle,
}

/// The sliders on the clinic site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderPreset {
    Gallery,
    VideoGallery,
    Testimonials,
    Hero,
}

impl SliderPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gallery" => Some(SliderPreset::Gallery),
            "video_gallery" => Some(SliderPreset::VideoGallery),
            "testimonials" => Some(SliderPreset::Testimonials),
            "hero" => Some(SliderPreset::Hero),
            _ => None,
        }
    }

    pub fn config(&self, slide_count: usize) -> SliderConfig {
        let base = SliderConfig::new(slide_count);
        match self {
            SliderPreset::Gallery => SliderConfig {
                live_region_id: "gallery-live-region".to_string(),
                ..base
            },
            SliderPreset::VideoGallery => SliderConfig {
                autoplay_enabled: false,
                live_region_id: "video-gallery-live-region".to_string(),
                ..base
            },
            SliderPreset::Testimonials => SliderConfig {
                autoplay_delay_ms: 8000,
                indicators: IndicatorSource::External,
                dot_label: "Testimonial".to_string(),
                live_region_id: "testimonial-live-region".to_string(),
                ..base
            },
            SliderPreset::Hero => SliderConfig {
                transition_duration_ms: 1500,
                dot_label: "Go to slide".to_string(),
                live_region_id: "hero-live-region".to_string(),
                keyboard_navigation: true,
                ..base
            },
        }
    }

    pub fn render_style(&self, slide_width_px: f32, embed_sources: Vec<String>) -> RenderStyle {
        match self {
            SliderPreset::Gallery => RenderStyle::Track {
                unit: default_track_unit(),
                slide_width_px,
            },
            SliderPreset::VideoGallery => RenderStyle::VideoTrack {
                unit: default_video_unit(),
                slide_width_px,
                embed_sources,
            },
            SliderPreset::Testimonials => RenderStyle::Fade {
                unit: default_fade_unit(),
            },
            SliderPreset::Hero => RenderStyle::Fade {
                unit: "slide".to_string(),
            },
        }
    }

    pub fn setup(
        &self,
        slide_count: usize,
        slide_width_px: f32,
        embed_sources: Vec<String>,
    ) -> SliderSetup {
        SliderSetup {
            config: self.config(slide_count),
            render: self.render_style(slide_width_px, embed_sources),
        }
    }
}

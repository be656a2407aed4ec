// Render adapters: the only slider-specific code. Each turns "show index N"
// into render commands the host applies to the DOM.

use serde::{Deserialize, Serialize};

use crate::types::{PauseAction, RenderCommand};

/// Easing used by track transitions.
pub const TRACK_EASING: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Player API message that pauses a YouTube iframe.
pub const YOUTUBE_PAUSE_MESSAGE: &str = r#"{"event":"command","func":"pauseVideo","args":""}"#;

/// Delay before a blanked Facebook iframe gets its source back.
pub const FACEBOOK_RELOAD_DELAY_MS: u64 = 100;

/// What the adapter needs to draw one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub index: usize,
    pub slide_count: usize,
    /// Configured transition length; adapters must animate for exactly this long.
    pub transition_ms: u64,
}

/// Applies the visual state for an index.
pub trait RenderAdapter {
    /// Noun used in announcements ("image slide", "video", ...).
    fn unit(&self) -> &str;

    fn render(&mut self, ctx: &RenderContext) -> Vec<RenderCommand>;

    /// Slide width changed (resize, orientation change, late image load).
    fn relayout(&mut self, _slide_width_px: f32) {}
}

impl<A: RenderAdapter + ?Sized> RenderAdapter for Box<A> {
    fn unit(&self) -> &str {
        (**self).unit()
    }

    fn render(&mut self, ctx: &RenderContext) -> Vec<RenderCommand> {
        (**self).render(ctx)
    }

    fn relayout(&mut self, slide_width_px: f32) {
        (**self).relayout(slide_width_px)
    }
}

/// Slides laid out in a row; the track is translated by whole slide widths.
#[derive(Debug, Clone)]
pub struct TrackAdapter {
    unit: String,
    slide_width_px: f32,
}

impl TrackAdapter {
    pub fn new(unit: impl Into<String>, slide_width_px: f32) -> Self {
        TrackAdapter {
            unit: unit.into(),
            slide_width_px: slide_width_px.max(0.0),
        }
    }

    fn translate(&self, ctx: &RenderContext) -> RenderCommand {
        let distance = ctx.index as f32 * self.slide_width_px;
        RenderCommand::TranslateTrack {
            offset_px: -distance,
            transform: format!("translateX(-{}px)", distance),
            transition: format!("transform {}ms {}", ctx.transition_ms, TRACK_EASING),
        }
    }
}

impl RenderAdapter for TrackAdapter {
    fn unit(&self) -> &str {
        &self.unit
    }

    fn render(&mut self, ctx: &RenderContext) -> Vec<RenderCommand> {
        vec![self.translate(ctx)]
    }

    fn relayout(&mut self, slide_width_px: f32) {
        self.slide_width_px = slide_width_px.max(0.0);
    }
}

/// Embedded player hosting a video slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedProvider {
    YouTube,
    Facebook,
    /// No iframe, or a player we cannot pause.
    Other,
}

impl EmbedProvider {
    /// Detect the provider from an iframe `src`.
    pub fn from_src(src: &str) -> Self {
        if src.contains("youtube.com") {
            EmbedProvider::YouTube
        } else if src.contains("facebook.com") {
            EmbedProvider::Facebook
        } else {
            EmbedProvider::Other
        }
    }

    fn pause_action(&self) -> Option<PauseAction> {
        match self {
            EmbedProvider::YouTube => Some(PauseAction::PostMessage {
                message: YOUTUBE_PAUSE_MESSAGE.to_string(),
            }),
            EmbedProvider::Facebook => Some(PauseAction::ReloadSource {
                restore_after_ms: FACEBOOK_RELOAD_DELAY_MS,
            }),
            EmbedProvider::Other => None,
        }
    }
}

/// Track slider whose slides hold embedded players. Players off screen are paused.
#[derive(Debug, Clone)]
pub struct VideoTrackAdapter {
    track: TrackAdapter,
    embeds: Vec<EmbedProvider>,
}

impl VideoTrackAdapter {
    pub fn new(unit: impl Into<String>, slide_width_px: f32, embeds: Vec<EmbedProvider>) -> Self {
        VideoTrackAdapter {
            track: TrackAdapter::new(unit, slide_width_px),
            embeds,
        }
    }

    /// Build from the iframe sources, in slide order.
    pub fn from_sources<S: AsRef<str>>(
        unit: impl Into<String>,
        slide_width_px: f32,
        sources: &[S],
    ) -> Self {
        let embeds = sources
            .iter()
            .map(|s| EmbedProvider::from_src(s.as_ref()))
            .collect();
        Self::new(unit, slide_width_px, embeds)
    }
}

impl RenderAdapter for VideoTrackAdapter {
    fn unit(&self) -> &str {
        self.track.unit()
    }

    fn render(&mut self, ctx: &RenderContext) -> Vec<RenderCommand> {
        let mut commands = vec![self.track.translate(ctx)];
        for (index, embed) in self.embeds.iter().enumerate() {
            if index == ctx.index {
                continue;
            }
            if let Some(action) = embed.pause_action() {
                commands.push(RenderCommand::PauseEmbed { index, action });
            }
        }
        commands
    }

    fn relayout(&mut self, slide_width_px: f32) {
        self.track.relayout(slide_width_px);
    }
}

/// Slides stacked in place; only the current one carries the active class.
#[derive(Debug, Clone)]
pub struct FadeAdapter {
    unit: String,
}

impl FadeAdapter {
    pub fn new(unit: impl Into<String>) -> Self {
        FadeAdapter { unit: unit.into() }
    }
}

impl RenderAdapter for FadeAdapter {
    fn unit(&self) -> &str {
        &self.unit
    }

    fn render(&mut self, ctx: &RenderContext) -> Vec<RenderCommand> {
        (0..ctx.slide_count)
            .map(|index| RenderCommand::SetSlideActive {
                index,
                active: index == ctx.index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(index: usize, slide_count: usize) -> RenderContext {
        RenderContext {
            index,
            slide_count,
            transition_ms: 500,
        }
    }

    #[test]
    fn track_translates_by_slide_width() {
        let mut adapter = TrackAdapter::new("image slide", 320.0);
        let commands = adapter.render(&ctx(2, 5));
        assert_eq!(
            commands,
            vec![RenderCommand::TranslateTrack {
                offset_px: -640.0,
                transform: "translateX(-640px)".to_string(),
                transition: format!("transform 500ms {}", TRACK_EASING),
            }]
        );
    }

    #[test]
    fn relayout_changes_offset() {
        let mut adapter = TrackAdapter::new("image slide", 320.0);
        adapter.relayout(400.0);
        match &adapter.render(&ctx(1, 3))[0] {
            RenderCommand::TranslateTrack { offset_px, .. } => assert_eq!(*offset_px, -400.0),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn provider_detection() {
        assert_eq!(
            EmbedProvider::from_src("https://www.youtube.com/embed/abc?enablejsapi=1"),
            EmbedProvider::YouTube
        );
        assert_eq!(
            EmbedProvider::from_src("https://www.facebook.com/plugins/video.php?href=x"),
            EmbedProvider::Facebook
        );
        assert_eq!(EmbedProvider::from_src(""), EmbedProvider::Other);
    }

    #[test]
    fn video_pauses_only_hidden_players() {
        let mut adapter = VideoTrackAdapter::from_sources(
            "video",
            300.0,
            &[
                "https://www.youtube.com/embed/a",
                "https://www.facebook.com/plugins/video.php",
                "local.mp4",
            ],
        );
        let commands = adapter.render(&ctx(0, 3));

        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], RenderCommand::TranslateTrack { .. }));
        assert_eq!(
            commands[1],
            RenderCommand::PauseEmbed {
                index: 1,
                action: PauseAction::ReloadSource {
                    restore_after_ms: 100
                },
            }
        );

        let commands = adapter.render(&ctx(1, 3));
        assert!(commands.contains(&RenderCommand::PauseEmbed {
            index: 0,
            action: PauseAction::PostMessage {
                message: YOUTUBE_PAUSE_MESSAGE.to_string()
            },
        }));
    }

    #[test]
    fn fade_marks_single_slide() {
        let mut adapter = FadeAdapter::new("testimonial");
        let commands = adapter.render(&ctx(1, 3));
        let active: Vec<_> = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::SetSlideActive { active: true, .. }))
            .collect();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            active,
            vec![&RenderCommand::SetSlideActive {
                index: 1,
                active: true
            }]
        );
    }
}

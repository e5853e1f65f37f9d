use raylib::prelude::*;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SplashPhase {
    Loading,   // Overlay fully opaque, icon fading in
    Revealing, // Timer fired, overlay and content fading
    Ready,     // Overlay gone
}

/// One-shot splash timeline, driven by frame time since mount.
///
/// The phase only moves forward. Nothing outside `update` can shorten or
/// extend the timer.
#[derive(Debug, Clone)]
pub struct SplashSequencer {
    phase: SplashPhase,
    elapsed: f32,
    revealed_at: Option<f32>,
}

impl Default for SplashSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashSequencer {
    pub fn new() -> Self {
        Self { phase: SplashPhase::Loading, elapsed: 0.0, revealed_at: None }
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    /// The `is_loading` flag of the view.
    pub fn is_loading(&self) -> bool {
        self.phase == SplashPhase::Loading
    }

    /// Advances the clock. Returns the new phase when it changed this frame.
    pub fn update(&mut self, dt: f32) -> Option<SplashPhase> {
        let before = self.phase;
        self.elapsed += dt.max(0.0);

        if self.phase == SplashPhase::Loading && self.elapsed >= SPLASH_DURATION {
            self.phase = SplashPhase::Revealing;
            self.revealed_at = Some(SPLASH_DURATION);
            log::info!("splash timer fired after {:.2}s, revealing", self.elapsed);
        }
        if self.phase == SplashPhase::Revealing && self.elapsed >= self.overlay_gone_at() {
            self.phase = SplashPhase::Ready;
            log::debug!("splash overlay removed");
        }

        (self.phase != before).then_some(self.phase)
    }

    /// Opacity of the black loading overlay.
    pub fn overlay_opacity(&self) -> f32 {
        match (self.phase, self.revealed_at) {
            (SplashPhase::Ready, _) => 0.0,
            (_, None) => 1.0,
            (_, Some(revealed_at)) => {
                let t = self.elapsed - revealed_at - OVERLAY_FADE_DELAY;
                if t <= 0.0 {
                    1.0
                } else {
                    ease::cubic_in_out(t.min(OVERLAY_FADE_DURATION), 1.0, -1.0, OVERLAY_FADE_DURATION)
                }
            }
        }
    }

    /// Opacity and scale of the splash icon: fades in on mount, back out on reveal.
    pub fn icon_state(&self) -> (f32, f32) {
        let progress = match self.revealed_at {
            None => self.elapsed.min(ICON_FADE_DURATION) / ICON_FADE_DURATION,
            Some(revealed_at) => {
                let t = (self.elapsed - revealed_at).min(ICON_FADE_DURATION);
                1.0 - t / ICON_FADE_DURATION
            }
        };
        let eased = ease::cubic_in_out(progress.clamp(0.0, 1.0), 0.0, 1.0, 1.0);
        (eased, 0.8 + 0.2 * eased)
    }

    /// Opacity of the main content, fading in from its own mount-relative delay.
    pub fn content_opacity(&self) -> f32 {
        let t = self.elapsed - CONTENT_FADE_DELAY;
        if t <= 0.0 {
            0.0
        } else {
            ease::cubic_in_out(t.min(CONTENT_FADE_DURATION), 0.0, 1.0, CONTENT_FADE_DURATION)
        }
    }

    fn overlay_gone_at(&self) -> f32 {
        self.revealed_at.unwrap_or(SPLASH_DURATION) + OVERLAY_FADE_DELAY + OVERLAY_FADE_DURATION
    }
}

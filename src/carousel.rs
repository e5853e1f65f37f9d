use std::num::NonZeroUsize;

use crate::constants::*;
use crate::spring::Spring;

/// Selected card index plus the springs animating the card strip and the
/// background parallax toward it.
#[derive(Debug, Clone)]
pub struct CarouselController {
    len: NonZeroUsize,
    current: usize,

    strip: Spring, // percent of the strip width
    pan: Spring,   // pixels
}

impl CarouselController {
    pub fn new(len: NonZeroUsize) -> Self {
        let mut carousel = Self {
            len,
            current: 0,
            strip: Spring::new(STRIP_SPRING_MASS, STRIP_SPRING_STIFFNESS, STRIP_SPRING_DAMPING, 0.0),
            pan: Spring::new(PAN_SPRING_MASS, PAN_SPRING_STIFFNESS, PAN_SPRING_DAMPING, 0.0),
        };
        // Start at rest on the initial targets
        let pan = carousel.target_pan_offset();
        carousel.pan = Spring::new(PAN_SPRING_MASS, PAN_SPRING_STIFFNESS, PAN_SPRING_DAMPING, pan);
        carousel
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.len();
        self.retarget();
    }

    pub fn retreat(&mut self) {
        self.current = (self.current + self.len() - 1) % self.len();
        self.retarget();
    }

    /// Resting strip offset for the current card: `-(current * 100 / N)` percent.
    pub fn target_strip_offset(&self) -> f32 {
        -(self.current as f32 * 100.0 / self.len() as f32)
    }

    /// Resting background offset: `-(current - (N - 1) / 2) * PAN_AMOUNT` pixels.
    pub fn target_pan_offset(&self) -> f32 {
        let middle = (self.len() as f32 - 1.0) / 2.0;
        -(self.current as f32 - middle) * PAN_AMOUNT
    }

    /// Animated strip offset, in percent of the strip width.
    pub fn strip_offset(&self) -> f32 {
        self.strip.position()
    }

    /// Animated background offset, in pixels.
    pub fn pan_offset(&self) -> f32 {
        self.pan.position()
    }

    pub fn is_settled(&self) -> bool {
        self.strip.is_at_rest() && self.pan.is_at_rest()
    }

    pub fn update(&mut self, dt: f32) {
        self.strip.update(dt);
        self.pan.update(dt);
    }

    fn retarget(&mut self) {
        log::debug!("carousel -> {}/{}", self.current + 1, self.len());
        self.strip.set_target(self.target_strip_offset());
        self.pan.set_target(self.target_pan_offset());
    }
}

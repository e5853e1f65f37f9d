/// Damped spring driving a single value toward a target.
///
/// Integrated with semi-implicit Euler in fixed sub-steps so stiff springs
/// stay stable at any frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    mass: f32,
    stiffness: f32,
    damping: f32,

    position: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    const STEP: f32 = 1.0 / 1000.0;
    const REST_DELTA: f32 = 0.01;
    const REST_SPEED: f32 = 0.01;

    pub fn new(mass: f32, stiffness: f32, damping: f32, position: f32) -> Self {
        Self {
            mass,
            stiffness,
            damping,
            position,
            velocity: 0.0,
            target: position,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Keeps the current position and velocity; only the rest point moves.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.target - self.position).abs() < Self::REST_DELTA && self.velocity.abs() < Self::REST_SPEED
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = 0.0;
            return;
        }

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let step = remaining.min(Self::STEP);
            let force = -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * step;
            self.position += self.velocity * step;
            remaining -= step;
        }

        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn strip_spring() -> Spring {
        Spring::new(STRIP_SPRING_MASS, STRIP_SPRING_STIFFNESS, STRIP_SPRING_DAMPING, 0.0)
    }

    #[test]
    fn settles_on_target() {
        let mut spring = strip_spring();
        spring.set_target(-25.0);
        for _ in 0..(FPS * 3) {
            spring.update(FRAME_TIME);
        }
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), -25.0);
    }

    #[test]
    fn moves_gradually_instead_of_jumping() {
        let mut spring = strip_spring();
        spring.set_target(-25.0);
        spring.update(FRAME_TIME);
        assert!(spring.position() < 0.0);
        assert!(spring.position() > -25.0);
    }

    #[test]
    fn retarget_keeps_position_continuous() {
        let mut spring = strip_spring();
        spring.set_target(-50.0);
        for _ in 0..10 {
            spring.update(FRAME_TIME);
        }
        let before = spring.position();
        spring.set_target(0.0);
        assert_eq!(spring.position(), before);
        spring.update(FRAME_TIME);
        assert!((spring.position() - before).abs() < 10.0);
    }

    #[test]
    fn at_rest_spring_ignores_updates() {
        let mut spring = Spring::new(PAN_SPRING_MASS, PAN_SPRING_STIFFNESS, PAN_SPRING_DAMPING, 12.0);
        spring.update(1.0);
        assert_eq!(spring.position(), 12.0);
    }
}

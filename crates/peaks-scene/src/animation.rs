//! Time-driven crossfade between the two height images.
//!
//! The animation advances a degree accumulator at 360° per four seconds of
//! wall-clock time and derives the blend factor from half that angle, so a
//! full fade A→B→A takes eight seconds. The accumulator wraps at 720° to
//! keep sine evaluation accurate over arbitrarily long runs.

/// Degrees advanced per millisecond of elapsed time.
const DEGREES_PER_MS: f32 = 360.0 / 4000.0;

/// Accumulator period in degrees. The blend uses the half angle, so the
/// factor itself repeats every 720° of accumulation.
const WRAP_DEGREES: f32 = 720.0;

/// Oscillating blend factor for the two-image crossfade.
#[derive(Debug, Clone)]
pub struct BlendAnimation {
    accumulator_degrees: f32,
}

impl Default for BlendAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl BlendAnimation {
    /// Start at the midpoint of the fade (both images at half weight).
    pub fn new() -> Self {
        Self {
            accumulator_degrees: 0.0,
        }
    }

    /// Advance the animation by `elapsed_ms` milliseconds.
    pub fn advance(&mut self, elapsed_ms: f32) {
        self.accumulator_degrees =
            (self.accumulator_degrees + elapsed_ms * DEGREES_PER_MS).rem_euclid(WRAP_DEGREES);
    }

    /// The current blend factor in [0, 1].
    ///
    /// 0 shows only the first image, 1 only the second.
    pub fn blend_factor(&self) -> f32 {
        ((self.accumulator_degrees * 0.5).to_radians().sin() + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_half_blend() {
        let animation = BlendAnimation::new();
        assert!((animation.blend_factor() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_full_second_image_at_two_seconds() {
        let mut animation = BlendAnimation::new();
        animation.advance(2000.0);
        assert!((animation.blend_factor() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_full_first_image_at_six_seconds() {
        let mut animation = BlendAnimation::new();
        animation.advance(6000.0);
        assert!(animation.blend_factor().abs() < 1e-5);
    }

    #[test]
    fn test_period_is_eight_seconds() {
        let mut a = BlendAnimation::new();
        a.advance(1234.0);
        let before = a.blend_factor();
        a.advance(8000.0);
        assert!((a.blend_factor() - before).abs() < 1e-4);
    }

    #[test]
    fn test_factor_stays_bounded_over_long_runs() {
        let mut animation = BlendAnimation::new();
        for _ in 0..10_000 {
            animation.advance(16.7);
            let blend = animation.blend_factor();
            assert!((0.0..=1.0).contains(&blend), "blend = {blend}");
        }
    }

    #[test]
    fn test_small_steps_match_one_large_step() {
        let mut stepped = BlendAnimation::new();
        for _ in 0..100 {
            stepped.advance(10.0);
        }
        let mut jumped = BlendAnimation::new();
        jumped.advance(1000.0);
        assert!((stepped.blend_factor() - jumped.blend_factor()).abs() < 1e-4);
    }

    #[test]
    fn test_factor_is_continuous_across_wrap() {
        let mut animation = BlendAnimation::new();
        animation.advance(7999.0);
        let before = animation.blend_factor();
        animation.advance(2.0);
        assert!((animation.blend_factor() - before).abs() < 0.01);
    }
}

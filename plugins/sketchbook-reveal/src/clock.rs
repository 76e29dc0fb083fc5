/// Animation time assumed per processed frame.
pub const FRAME_STEP: f64 = 1.0 / 60.0;

/// Per-instance animation clock. Advances a fixed step every processed frame
/// regardless of host frame rate or host time.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame and return the new time in seconds.
    pub fn tick(&mut self) -> f32 {
        self.frames = self.frames.wrapping_add(1);
        self.elapsed += FRAME_STEP;
        self.elapsed as f32
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        assert!((clock.tick() - (1.0 / 60.0) as f32).abs() < 1e-7);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn sixty_ticks_make_a_second() {
        let mut clock = FrameClock::new();
        let mut last = 0.0;
        for _ in 0..60 {
            let t = clock.tick();
            assert!(t > last);
            last = t;
        }
        assert!((clock.elapsed() - 1.0).abs() < 1e-9);
    }
}
